use haven_core::models::area::TherapyArea;

/// Therapy areas the assessment can recommend, in display order.
/// Order matters: equal scores keep this order in the ranking.
pub fn therapy_areas() -> &'static [TherapyArea] {
    static AREAS: std::sync::LazyLock<Vec<TherapyArea>> = std::sync::LazyLock::new(|| {
        let areas: [(&str, &str, &str, &[&str]); 11] = [
            (
                "anxiety",
                "Anxiety",
                "Persistent worry, panic attacks, and nervousness that get in the way of daily life.",
                &["anxiety", "anxious", "worry", "panic", "nervous"],
            ),
            (
                "depression",
                "Depression",
                "Low mood, loss of interest, and feelings of hopelessness or emptiness.",
                &["depress", "sad", "hopeless", "mood", "empty"],
            ),
            (
                "stress",
                "Stress Management",
                "Building coping strategies for pressure at work, study, or home.",
                &["stress", "overwhelm", "pressure", "burnout", "work"],
            ),
            (
                "trauma",
                "Trauma & PTSD",
                "Processing distressing past events, flashbacks, and their lasting effects.",
                &["trauma", "abuse", "ptsd", "flashback", "past"],
            ),
            (
                "couples",
                "Couples & Relationships",
                "Improving communication and connection with a partner.",
                &["relationship", "partner", "couple", "marriage"],
            ),
            (
                "family",
                "Family Therapy",
                "Working through conflict and changing roles within the family.",
                &["family", "conflict", "parent", "child"],
            ),
            (
                "grief",
                "Grief & Loss",
                "Support after bereavement, separation, or other significant losses.",
                &["grief", "loss", "bereave", "death"],
            ),
            (
                "self-esteem",
                "Self-Esteem",
                "Strengthening confidence and a kinder relationship with yourself.",
                &["self-esteem", "confidence", "self-worth", "worth"],
            ),
            (
                "addiction",
                "Addiction & Substance Use",
                "Changing patterns of alcohol, drug, or behavioural dependence.",
                &["addiction", "alcohol", "substance", "drug", "gambling"],
            ),
            (
                "sleep",
                "Sleep Difficulties",
                "Addressing insomnia, disrupted sleep, and daytime fatigue.",
                &["sleep", "insomnia", "tired", "fatigue"],
            ),
            (
                "anger",
                "Anger Management",
                "Understanding triggers and responding to anger in healthier ways.",
                &["anger", "angry", "irritab", "temper"],
            ),
        ];

        areas
            .iter()
            .map(|(id, name, description, keywords)| TherapyArea {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect()
    });
    &AREAS
}
