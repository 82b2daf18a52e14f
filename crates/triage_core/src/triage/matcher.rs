//! Symptom keyword matcher and chat replies.
//!
//! The dictionary is ordered: the first entry whose phrase occurs in the
//! text decides the department, so more specific phrases must come before
//! the generic ones they contain.

use super::{contains_any, normalize_text};
use once_cell::sync::Lazy;
use regex::Regex;

pub const CARDIOLOGY: &str = "Cardiology";
pub const PULMONOLOGY: &str = "Pulmonology";
pub const DERMATOLOGY: &str = "Dermatology";
pub const NEUROLOGY: &str = "Neurology";
pub const ORTHOPEDICS: &str = "Orthopedics";
pub const GASTROENTEROLOGY: &str = "Gastroenterology";
pub const OPHTHALMOLOGY: &str = "Ophthalmology";
pub const ENT: &str = "ENT (Ear, Nose, Throat)";
pub const UROLOGY: &str = "Urology";
pub const GENERAL_MEDICINE: &str = "General Medicine";
pub const EMERGENCY: &str = "Emergency Department";

const DEPARTMENT_MAPPING: &[(&str, &str)] = &[
    ("chest pain", CARDIOLOGY),
    ("heart pain", CARDIOLOGY),
    ("palpitations", CARDIOLOGY),
    ("irregular heartbeat", CARDIOLOGY),
    ("heart racing", CARDIOLOGY),
    ("chest tightness", CARDIOLOGY),
    ("chest pressure", CARDIOLOGY),
    ("shortness of breath", PULMONOLOGY),
    ("difficulty breathing", PULMONOLOGY),
    ("wheezing", PULMONOLOGY),
    ("cough", PULMONOLOGY),
    ("chest congestion", PULMONOLOGY),
    ("breathing problems", PULMONOLOGY),
    ("rash", DERMATOLOGY),
    ("skin irritation", DERMATOLOGY),
    ("itchy skin", DERMATOLOGY),
    ("skin lesion", DERMATOLOGY),
    ("acne", DERMATOLOGY),
    ("eczema", DERMATOLOGY),
    ("psoriasis", DERMATOLOGY),
    ("mole", DERMATOLOGY),
    ("headache", NEUROLOGY),
    ("migraine", NEUROLOGY),
    ("dizziness", NEUROLOGY),
    ("seizure", NEUROLOGY),
    ("numbness", NEUROLOGY),
    ("tingling", NEUROLOGY),
    ("memory loss", NEUROLOGY),
    ("confusion", NEUROLOGY),
    ("back pain", ORTHOPEDICS),
    ("joint pain", ORTHOPEDICS),
    ("knee pain", ORTHOPEDICS),
    ("shoulder pain", ORTHOPEDICS),
    ("broken bone", ORTHOPEDICS),
    ("fracture", ORTHOPEDICS),
    ("sprain", ORTHOPEDICS),
    ("muscle pain", ORTHOPEDICS),
    ("stomach pain", GASTROENTEROLOGY),
    ("abdominal pain", GASTROENTEROLOGY),
    ("nausea", GASTROENTEROLOGY),
    ("vomiting", GASTROENTEROLOGY),
    ("diarrhea", GASTROENTEROLOGY),
    ("constipation", GASTROENTEROLOGY),
    ("heartburn", GASTROENTEROLOGY),
    ("acid reflux", GASTROENTEROLOGY),
    ("eye pain", OPHTHALMOLOGY),
    ("vision problems", OPHTHALMOLOGY),
    ("blurred vision", OPHTHALMOLOGY),
    ("eye infection", OPHTHALMOLOGY),
    ("red eyes", OPHTHALMOLOGY),
    ("ear pain", ENT),
    ("sore throat", ENT),
    ("hearing loss", ENT),
    ("nasal congestion", ENT),
    ("sinus pain", ENT),
    ("urinary problems", UROLOGY),
    ("kidney pain", UROLOGY),
    ("bladder pain", UROLOGY),
    ("frequent urination", UROLOGY),
    ("fever", GENERAL_MEDICINE),
    ("fatigue", GENERAL_MEDICINE),
    ("weakness", GENERAL_MEDICINE),
    ("weight loss", GENERAL_MEDICINE),
    ("night sweats", GENERAL_MEDICINE),
    ("chills", GENERAL_MEDICINE),
];

const EMERGENCY_KEYWORDS: &[&str] = &[
    "severe",
    "intense",
    "unbearable",
    "emergency",
    "urgent",
    "can't breathe",
    "chest crushing",
    "sudden",
    "acute",
];

const MEDICAL_KEYWORDS: &[&str] = &[
    "pain",
    "ache",
    "hurt",
    "sore",
    "burning",
    "fever",
    "nausea",
    "vomiting",
    "cough",
    "headache",
    "dizziness",
    "rash",
    "swelling",
    "bleeding",
    "difficulty",
    "shortness",
    "chest",
    "stomach",
    "back",
    "joint",
    "symptom",
    "sick",
    "ill",
    "feel",
    "experiencing",
    "having trouble",
    "tired",
    "fatigue",
    "weak",
    "dizzy",
    "numb",
    "tingling",
    "cramps",
    "infection",
    "inflammation",
    "bruise",
    "cut",
    "wound",
    "injury",
];

const CONTAGIOUS_KEYWORDS: &[&str] = &[
    "flu",
    "fever",
    "cough",
    "cold",
    "sore throat",
    "runny nose",
    "sneezing",
    "congestion",
    "chills",
    "body aches",
    "headache",
    "respiratory",
    "breathing",
    "pneumonia",
    "bronchitis",
    "covid",
    "coronavirus",
    "viral",
    "infection",
    "contagious",
    "sick",
];

static GREETING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(hi|hello|hey|good morning|good afternoon|good evening)$",
        r"^(how are you|what's up|what can you do|who are you)$",
        r"^(thanks|thank you|bye|goodbye|see you)$",
        r"^(yes|no|okay|ok|sure|alright)$",
        r"^(help|what|how)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid greeting regex"))
    .collect()
});

const GREETING_HELLO: &str = "Hello! I'm your AI medical assistant. I'm here to help guide you to the right medical department based on your symptoms. How are you feeling today? Please feel free to describe any symptoms or health concerns you might have.";
const GREETING_HOW_ARE_YOU: &str = "Thank you for asking! I'm doing well and ready to help you with any health concerns. I'm designed to analyze symptoms and provide guidance on which medical department would be most appropriate for your needs. What brings you here today?";
const GREETING_CAPABILITIES: &str = "I'm here to help you navigate healthcare by:\n\n\u{2022} Analyzing your symptoms using advanced AI\n\u{2022} Assessing risk levels and urgency\n\u{2022} Recommending the most appropriate medical department\n\u{2022} Providing personalized health guidance\n\u{2022} Tracking your medical history\n\nSimply describe how you're feeling or any symptoms you're experiencing, and I'll provide comprehensive guidance. What would you like help with today?";
const GREETING_WHO: &str = "I'm an advanced AI medical assistant designed to help you navigate healthcare decisions. I use natural language processing and risk assessment to analyze your symptoms and guide you to the most appropriate medical department. I'm here to support you, but I don't replace professional medical diagnosis. How can I assist you today?";
const GREETING_THANKS: &str = "You're very welcome! I'm glad I could help. If you have any other health concerns or questions, please don't hesitate to ask. Your health and well-being are important, and I'm here whenever you need guidance.";
const GREETING_BYE: &str = "Goodbye! Take care of yourself, and remember that I'm here whenever you need medical guidance. Don't hesitate to return if you have any health concerns. Wishing you good health!";
const GREETING_DEFAULT: &str = "I'm here to help you with any health concerns or symptoms you might be experiencing. Feel free to describe how you're feeling, and I'll provide guidance on the best medical department for your needs. What can I help you with today?";
const NON_MEDICAL_REPLY: &str = "I understand you'd like to chat! I'm specifically designed to help with medical symptoms and health concerns. If you're experiencing any symptoms or have health questions, please feel free to describe them and I'll provide appropriate guidance. Otherwise, how are you feeling today?";

const MASK_REMINDER: &str = "\n\n\u{1F637} **Safety Reminder**: Since you're experiencing symptoms that could be contagious, I strongly recommend wearing a mask when visiting the hospital to protect other patients and healthcare workers. This helps prevent the spread of infection and keeps everyone safe.";
pub const DISCLAIMER: &str = "\n\n\u{26A0}\u{FE0F} **Important**: This is general guidance based on AI analysis, and it's important to consult with a healthcare professional for proper diagnosis and treatment.";

/// Maps free text to a department label.
///
/// First dictionary hit wins; then emergency wording routes to the
/// Emergency Department; everything else falls back to General Medicine.
pub fn route_department(text: &str) -> &'static str {
    let normalized = normalize_text(text);

    if let Some((_, department)) = DEPARTMENT_MAPPING
        .iter()
        .find(|(phrase, _)| normalized.contains(phrase))
    {
        return department;
    }

    if contains_any(&normalized, EMERGENCY_KEYWORDS) {
        return EMERGENCY;
    }

    GENERAL_MEDICINE
}

pub fn contains_medical_symptoms(text: &str) -> bool {
    contains_any(&normalize_text(text), MEDICAL_KEYWORDS)
}

/// True only for short social phrases with no medical content at all.
pub fn is_pure_greeting(text: &str) -> bool {
    if contains_medical_symptoms(text) {
        return false;
    }
    let normalized = normalize_text(text);
    let trimmed = normalized.trim();
    GREETING_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(trimmed))
}

pub fn is_contagious(text: &str) -> bool {
    contains_any(&normalize_text(text), CONTAGIOUS_KEYWORDS)
}

/// Canned reply for a social message.
pub fn greeting_reply(text: &str) -> &'static str {
    let normalized = normalize_text(text);
    let lower = normalized.trim();

    if contains_any(lower, &["hi", "hello", "hey"]) {
        GREETING_HELLO
    } else if lower.contains("how are you") {
        GREETING_HOW_ARE_YOU
    } else if contains_any(lower, &["what can you do", "help"]) {
        GREETING_CAPABILITIES
    } else if lower.contains("who are you") {
        GREETING_WHO
    } else if lower.contains("thank") {
        GREETING_THANKS
    } else if contains_any(lower, &["bye", "goodbye"]) {
        GREETING_BYE
    } else {
        GREETING_DEFAULT
    }
}

fn department_blurb(department: &str) -> &'static str {
    match department {
        EMERGENCY => "Please seek immediate medical attention if you're experiencing severe symptoms.",
        CARDIOLOGY => "They specialize in heart and cardiovascular conditions.",
        PULMONOLOGY => "They focus on respiratory and lung-related issues.",
        DERMATOLOGY => "They specialize in skin, hair, and nail conditions.",
        NEUROLOGY => "They focus on nervous system and brain-related conditions.",
        ORTHOPEDICS => "They specialize in bone, joint, and muscle conditions.",
        GASTROENTEROLOGY => "They focus on digestive system and stomach-related issues.",
        _ => "They can provide a comprehensive evaluation of your symptoms.",
    }
}

/// Full chat response for one user message.
///
/// Medical content always takes precedence over greetings, so
/// "hi, my chest hurts" gets a department recommendation.
pub fn chat_reply(text: &str) -> String {
    if contains_medical_symptoms(text) {
        let department = route_department(text);
        let mut reply = format!(
            "Thank you for sharing your symptoms with me. Based on what you've described, I recommend visiting our **{department}** department. {}",
            department_blurb(department)
        );
        if is_contagious(text) {
            reply.push_str(MASK_REMINDER);
        }
        reply.push_str(DISCLAIMER);
        return reply;
    }

    if is_pure_greeting(text) {
        return greeting_reply(text).to_string();
    }

    NON_MEDICAL_REPLY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_dictionary_hit_wins() {
        assert_eq!(route_department("Chest pain and a cough"), CARDIOLOGY);
        assert_eq!(route_department("a cough with chest pain"), CARDIOLOGY);
        assert_eq!(route_department("sore throat and cough"), PULMONOLOGY);
    }

    #[test]
    fn emergency_wording_without_dictionary_hit() {
        assert_eq!(route_department("sudden collapse"), EMERGENCY);
        assert_eq!(route_department("I can\u{2019}t breathe"), EMERGENCY);
    }

    #[test]
    fn unknown_text_defaults_to_general_medicine() {
        assert_eq!(route_department("something feels off"), GENERAL_MEDICINE);
        assert_eq!(route_department(""), GENERAL_MEDICINE);
    }

    #[test]
    fn greeting_detection_is_whole_string() {
        assert!(is_pure_greeting("  Hello "));
        assert!(is_pure_greeting("thank you"));
        assert!(!is_pure_greeting("hello there friend"));
        assert!(!is_pure_greeting("hi, my back hurts"));
    }

    #[test]
    fn greeting_reply_picks_by_substring() {
        assert_eq!(greeting_reply("bye"), GREETING_BYE);
        assert_eq!(greeting_reply("who are you"), GREETING_WHO);
        assert_eq!(greeting_reply("hello"), GREETING_HELLO);
        // "what" contains "hat", not "hi": falls through to default.
        assert_eq!(greeting_reply("what"), GREETING_DEFAULT);
    }

    #[test]
    fn chat_reply_adds_mask_reminder_for_contagious_symptoms() {
        let reply = chat_reply("I have a fever and a cough");
        assert!(reply.contains("**Pulmonology**"));
        assert!(reply.contains("Safety Reminder"));
        assert!(reply.ends_with(DISCLAIMER));
    }

    #[test]
    fn chat_reply_without_contagion_skips_reminder() {
        let reply = chat_reply("my knee pain is bad");
        assert!(reply.contains("**Orthopedics**"));
        assert!(!reply.contains("Safety Reminder"));
    }

    #[test]
    fn chat_reply_for_non_medical_text() {
        assert_eq!(chat_reply("tell me a joke"), NON_MEDICAL_REPLY);
        assert_eq!(chat_reply(""), NON_MEDICAL_REPLY);
        assert_eq!(chat_reply("hey"), GREETING_HELLO);
    }

    #[test]
    fn assistant_wording_mentions_ai_analysis() {
        assert!(greeting_reply("what can you do").contains("using advanced AI"));
        assert!(greeting_reply("who are you").starts_with("I'm an advanced AI medical assistant"));
        let reply = chat_reply("I have a headache");
        assert!(reply.contains("general guidance based on AI analysis"));
    }
}
