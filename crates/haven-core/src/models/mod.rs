pub mod answer;
pub mod area;
pub mod question;
pub mod recommendation;
pub mod record;
