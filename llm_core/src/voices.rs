//! Prebuilt voice catalog and reading instructions.

use rand::Rng;

pub const MALE_VOICES: &[&str] = &[
    "algenib",
    "alnilam",
    "charon",
    "enceladus",
    "fenrir",
    "iapetus",
    "orus",
    "puck",
    "pulcherrima",
    "rasalgethi",
    "sadachbia",
    "sadaltager",
    "schedar",
    "umbriel",
    "zubenelgenubi",
];

pub const FEMALE_VOICES: &[&str] = &[
    "achernar",
    "aoede",
    "autonoe",
    "callirrhoe",
    "despina",
    "erinome",
    "gacrux",
    "kore",
    "laomedeia",
    "leda",
    "sulafat",
    "vindemiatrix",
    "zephyr",
];

pub const NEUTRAL_VOICES: &[&str] = &["achird"];

/// Voice pool for a gender preference; anything unrecognized falls back
/// to the neutral pool.
pub fn voices_for(gender: &str) -> &'static [&'static str] {
    match gender.to_ascii_lowercase().as_str() {
        "male" => MALE_VOICES,
        "female" => FEMALE_VOICES,
        _ => NEUTRAL_VOICES,
    }
}

/// Pick one voice per speaker, avoiding giving both speakers the same
/// voice whenever the second pool allows it.
pub fn select_voices(gender1: &str, gender2: &str) -> (String, String) {
    let mut rng = rand::thread_rng();
    let pool1 = voices_for(gender1);
    let pool2 = voices_for(gender2);

    let voice1 = pool1[rng.gen_range(0..pool1.len())];
    let mut voice2 = pool2[rng.gen_range(0..pool2.len())];
    while voice2 == voice1 && pool2.len() > 1 {
        voice2 = pool2[rng.gen_range(0..pool2.len())];
    }

    (voice1.to_string(), voice2.to_string())
}

/// Reading instruction prepended to the script before synthesis.
pub fn accent_instruction(accent: &str) -> &'static str {
    match accent.to_ascii_lowercase().as_str() {
        "english" => {
            "Speak with an American/standard English accent throughout the podcast. \
             Use clear American pronunciation, intonation patterns, and speech rhythms."
        }
        "tagalog" => {
            "Speak with a Filipino/Tagalog accent throughout the podcast. \
             Use Filipino English pronunciation patterns, rhythms and intonation \
             even when speaking in English."
        }
        _ => {
            "Read the following podcast interview script in a natural, conversational \
             tone. Use a natural, relaxed speaking style as if chatting with friends \
             on a podcast. Include natural reactions and casual acknowledgments \
             between speakers."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_gender_speakers_get_distinct_voices() {
        for _ in 0..50 {
            let (v1, v2) = select_voices("male", "male");
            assert_ne!(v1, v2);
            assert!(MALE_VOICES.contains(&v1.as_str()));
            assert!(MALE_VOICES.contains(&v2.as_str()));
        }
    }

    #[test]
    fn single_voice_pool_allows_a_collision() {
        let (v1, v2) = select_voices("neutral", "neutral");
        assert_eq!(v1, "achird");
        assert_eq!(v2, "achird");
    }

    #[test]
    fn unknown_gender_falls_back_to_neutral() {
        assert_eq!(voices_for("robot"), NEUTRAL_VOICES);
        assert_eq!(voices_for("MALE"), MALE_VOICES);
    }

    #[test]
    fn accent_instruction_fallback() {
        assert!(accent_instruction("english").contains("American"));
        assert!(accent_instruction("tagalog").contains("Filipino"));
        assert!(accent_instruction("anything-else").contains("conversational"));
    }
}
