//! Scripted assistant responses: the non-LLM conversation path.
//!
//! Each view answers from its own keyword tables; the general view also
//! routes the user toward the other views. Replies are canned text; the risk
//! commentary draws from a small pool of equivalent phrasings.

use rand::seq::SliceRandom;

use crate::models::ChatView;

/// Greeting seeded into an empty transcript.
pub const WELCOME_MESSAGE: &str = "Hello! I'm your Heart Health Assistant. I'm here to help you \
     manage your cardiovascular health. How can I assist you today?\n\n\
     • Check your risk profile\n\
     • Get health recommendations\n\
     • Talk to your health coach";

/// Announcement when the user switches into a focused view. The general view
/// switches silently.
pub fn view_change_message(view: ChatView) -> Option<&'static str> {
    match view {
        ChatView::Risk => Some(
            "I'm now focusing on your cardiovascular risk assessment. What would you like to \
             know about your risk factors?",
        ),
        ChatView::Recommendations => Some(
            "Let's talk about heart health recommendations. I can provide guidance on diet, \
             exercise, or medication adherence.",
        ),
        ChatView::Coaching => Some(
            "I'm here as your health coach. How can I help you implement heart-healthy changes \
             in your daily life?",
        ),
        ChatView::General => None,
    }
}

/// Answer a query in the context of the current view.
pub fn generate_reply(query: &str, view: ChatView) -> String {
    match view {
        ChatView::Risk => risk_reply(query),
        ChatView::Recommendations => recommendations_reply(query),
        ChatView::Coaching => coaching_reply(query),
        ChatView::General => general_reply(query),
    }
}

// ─── Risk view ────────────────────────────────────────────────────────────────

const LOW_RISK_REPLIES: [&str; 3] = [
    "Based on the information you've shared, your cardiovascular risk appears to be relatively \
     low. However, it's always good to monitor your health regularly.",
    "Your risk factors appear to be well-managed. Regular check-ups with your doctor are still \
     important to maintain this positive status.",
    "Your current cardiovascular health metrics suggest a lower risk profile. This is great \
     news, but continued monitoring is recommended.",
];

const MEDIUM_RISK_REPLIES: [&str; 3] = [
    "I've analyzed your health data and there are some factors that suggest a moderate \
     cardiovascular risk. Let's discuss how to address these specific areas.",
    "Your cardiovascular risk assessment shows some areas of concern. With targeted lifestyle \
     changes, we can work to improve these factors.",
    "Based on your health metrics, you have a moderate risk level. The good news is that many \
     of these factors can be improved with the right approach.",
];

const HIGH_RISK_REPLIES: [&str; 3] = [
    "After reviewing your health information, I notice several significant risk factors for \
     cardiovascular disease that should be addressed promptly.",
    "Your current health metrics indicate a higher risk profile for heart disease. It's \
     important to work closely with your healthcare provider on a management plan.",
    "Your cardiovascular risk assessment shows several areas that need attention. Let's focus \
     on creating an action plan to address these risks systematically.",
];

fn risk_reply(query: &str) -> String {
    let pool = if contains_any(query, &["high", "serious"]) {
        &HIGH_RISK_REPLIES
    } else if contains_any(query, &["medium", "moderate"]) {
        &MEDIUM_RISK_REPLIES
    } else {
        &LOW_RISK_REPLIES
    };
    pick(pool)
}

// ─── Recommendations view ─────────────────────────────────────────────────────

fn recommendations_reply(query: &str) -> String {
    if contains_any(query, &["diet", "food", "eat"]) {
        return "Here are some heart-healthy dietary recommendations:\n\n\
                • Follow a Mediterranean-style diet rich in fruits, vegetables, whole grains, \
                and lean proteins\n\
                • Reduce sodium intake to less than 2,300mg per day\n\
                • Limit saturated fats and avoid trans fats\n\
                • Include omega-3 fatty acids from sources like fatty fish\n\
                • Moderate alcohol consumption\n\n\
                Would you like more specific information about any of these recommendations?"
            .to_string();
    }
    if contains_any(query, &["exercise", "activity", "move"]) {
        return "Here are exercise recommendations for heart health:\n\n\
                • Aim for at least 150 minutes of moderate-intensity aerobic activity weekly\n\
                • Include muscle-strengthening activities at least 2 days per week\n\
                • Start slowly and gradually increase intensity if you're new to exercise\n\
                • Consider activities like walking, swimming, or cycling\n\
                • Break up prolonged sitting with short activity breaks\n\n\
                Would you like help creating a specific exercise plan?"
            .to_string();
    }
    if contains_any(query, &["stress", "anxiety", "relax"]) {
        return "Managing stress is important for heart health. Here are some recommendations:\n\n\
                • Practice mindfulness meditation for 10-15 minutes daily\n\
                • Try deep breathing exercises when feeling stressed\n\
                • Maintain social connections and support networks\n\
                • Consider speaking with a mental health professional\n\
                • Ensure adequate sleep of 7-9 hours nightly\n\n\
                Would you like to learn more about any specific stress management technique?"
            .to_string();
    }
    "Here are key recommendations for cardiovascular health:\n\n\
     • Maintain a healthy diet rich in fruits, vegetables, and whole grains\n\
     • Exercise regularly (aim for 150 minutes weekly)\n\
     • Manage stress through mindfulness and relaxation techniques\n\
     • Get 7-9 hours of quality sleep nightly\n\
     • Don't smoke and limit alcohol consumption\n\
     • Take medications as prescribed by your doctor\n\n\
     Would you like more specific information about any of these areas?"
        .to_string()
}

// ─── Coaching view ────────────────────────────────────────────────────────────

fn coaching_reply(query: &str) -> String {
    if contains_any(query, &["motivation", "habit", "routine"]) {
        return "Building healthy habits takes time and consistency. Try these approaches:\n\n\
                • Start with small, achievable goals rather than major changes\n\
                • Track your progress with a health journal or app\n\
                • Create environmental cues to remind you of your new habits\n\
                • Find an accountability partner for mutual support\n\
                • Celebrate small victories along the way\n\n\
                What specific habit would you like to work on first?"
            .to_string();
    }
    if contains_any(query, &["struggle", "hard", "difficult", "challenge"]) {
        return "It's normal to face challenges when making health changes. Here's how to \
                overcome them:\n\n\
                • Identify specific barriers and brainstorm solutions for each\n\
                • Have contingency plans for common obstacles\n\
                • Focus on progress rather than perfection\n\
                • Reconnect with your deeper motivation for improving health\n\
                • Consider seeking additional support from healthcare providers\n\n\
                What specific challenge are you facing right now?"
            .to_string();
    }
    if contains_any(query, &["track", "progress", "monitor"]) {
        return "Tracking your progress is essential for long-term success. Consider:\n\n\
                • Monitoring key health metrics like blood pressure and weight\n\
                • Keeping a food and exercise journal\n\
                • Using health-tracking apps or devices\n\
                • Setting regular check-in times to review your progress\n\
                • Adjusting your goals as needed based on your results\n\n\
                What aspects of your health would you find most helpful to track?"
            .to_string();
    }
    "As your heart health coach, I'm here to support your journey to better cardiovascular \
     health. I can help you:\n\n\
     • Set realistic health goals\n\
     • Develop sustainable habits\n\
     • Overcome challenges and barriers\n\
     • Track and celebrate your progress\n\
     • Stay motivated for the long term\n\n\
     What specific aspect of your heart health journey would you like support with today?"
        .to_string()
}

// ─── General view ─────────────────────────────────────────────────────────────

fn general_reply(query: &str) -> String {
    if contains_any(query, &["risk", "profile"]) {
        return "I'd be happy to discuss your cardiovascular risk profile. What specific \
                aspects of your health would you like to review?"
            .to_string();
    }
    if contains_any(query, &["recommend", "suggestion", "advice"]) {
        return "I can provide heart health recommendations tailored to your needs. Would you \
                like to hear about diet, exercise, or stress management strategies?"
            .to_string();
    }
    if contains_any(query, &["coach", "support", "help me"]) {
        return "As your heart health coach, I'm here to help you implement positive changes. \
                What specific area would you like coaching with today?"
            .to_string();
    }
    "I'm your cardiovascular health assistant. I can help with:\n\n\
     • Assessing your risk profile\n\
     • Providing health recommendations\n\
     • Coaching you through lifestyle changes"
        .to_string()
}

fn contains_any(text: &str, patterns: &[&str]) -> bool {
    let lower = text.to_lowercase();
    patterns.iter().any(|p| lower.contains(p))
}

fn pick(pool: &[&str]) -> String {
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}
