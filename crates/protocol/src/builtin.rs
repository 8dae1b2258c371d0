//! Builtin protocol table

use shared::UrgencyLevel::{Immediate, NonUrgent, Standard, Urgent, VeryUrgent};

use crate::PresentingComplaint;

pub(crate) const VERSION: &str = "1.0.0";

pub(crate) fn complaints() -> Vec<PresentingComplaint> {
    vec![
        PresentingComplaint::new("chest-pain", "Chest Pain")
            .with_discriminator("crushing-central-pain", "Crushing central pain", Immediate)
            .with_discriminator("cardiac-pain-radiating", "Pain radiating to arm, jaw or back", VeryUrgent)
            .with_discriminator("chest-pain-breathless", "Pain with shortness of breath", VeryUrgent)
            .with_discriminator("pleuritic-pain", "Pleuritic pain (worse on breathing)", Urgent)
            .with_discriminator("chest-wall-tenderness", "Chest wall tenderness on palpation", Standard)
            .with_discriminator("chest-discomfort-resolved", "Mild discomfort, now resolved", NonUrgent),
        PresentingComplaint::new("shortness-of-breath", "Shortness of Breath")
            .with_discriminator("airway-compromise", "Airway compromise", Immediate)
            .with_discriminator("unable-to-speak-sentences", "Unable to speak in full sentences", VeryUrgent)
            .with_discriminator("audible-stridor", "Audible stridor", VeryUrgent)
            .with_discriminator("severe-asthma-history", "History of severe asthma", Urgent)
            .with_discriminator("productive-cough", "Productive cough with mild breathlessness", Standard)
            .with_discriminator("breathless-on-exertion", "Breathless on exertion only", NonUrgent),
        PresentingComplaint::new("abdominal-pain", "Abdominal Pain")
            .with_discriminator("abdominal-pain-shock", "Pain with signs of shock", Immediate)
            .with_discriminator("vomiting-blood", "Vomiting blood", VeryUrgent)
            .with_discriminator("pain-radiating-to-back", "Pain radiating to the back", VeryUrgent)
            .with_discriminator("persistent-vomiting", "Persistent vomiting", Urgent)
            .with_discriminator("abdominal-pain-moderate", "Moderate pain", Standard)
            .with_discriminator("abdominal-pain-mild", "Mild pain, tolerating fluids", NonUrgent),
        PresentingComplaint::new("headache", "Headache")
            .with_discriminator("headache-unresponsive", "Unresponsive or fitting", Immediate)
            .with_discriminator("thunderclap-onset", "Sudden severe (thunderclap) onset", VeryUrgent)
            .with_discriminator("acute-neurological-deficit", "Acute neurological deficit", VeryUrgent)
            .with_discriminator("neck-stiffness-with-fever", "Neck stiffness with fever", VeryUrgent)
            .with_discriminator("headache-visual-disturbance", "Visual disturbance", Urgent)
            .with_discriminator("headache-moderate", "Moderate pain, history of similar headaches", Standard)
            .with_discriminator("headache-mild", "Mild, no red flags", NonUrgent),
        PresentingComplaint::new("fever", "Fever")
            .with_discriminator("non-blanching-rash", "Non-blanching rash", VeryUrgent)
            .with_discriminator("fever-immunosuppressed", "Immunosuppressed patient", VeryUrgent)
            .with_discriminator("fever-rigors", "Rigors", Urgent)
            .with_discriminator("fever-recent-travel", "Recent foreign travel", Standard)
            .with_discriminator("fever-otherwise-well", "Feels warm, otherwise well", NonUrgent),
        PresentingComplaint::new("limb-injury", "Limb Injury")
            .with_discriminator("exsanguinating-haemorrhage", "Exsanguinating haemorrhage", Immediate)
            .with_discriminator("absent-distal-pulse", "Absent distal pulse", VeryUrgent)
            .with_discriminator("open-fracture", "Gross deformity or open fracture", Urgent)
            .with_discriminator("unable-to-bear-weight", "Unable to bear weight", Standard)
            .with_discriminator("minor-sprain", "Minor sprain or bruising", NonUrgent),
        PresentingComplaint::new("head-injury", "Head Injury")
            .with_discriminator("head-injury-fitting", "Currently fitting", Immediate)
            .with_discriminator("loss-of-consciousness", "Loss of consciousness at time of injury", VeryUrgent)
            .with_discriminator("head-injury-anticoagulated", "Taking anticoagulants", VeryUrgent)
            .with_discriminator("vomiting-since-injury", "Vomiting since injury", Urgent)
            .with_discriminator("scalp-wound", "Scalp wound, no other features", Standard)
            .with_discriminator("minor-head-bump", "Minor bump, no loss of consciousness", NonUrgent),
        PresentingComplaint::new("allergic-reaction", "Allergic Reaction")
            .with_discriminator("facial-swelling-stridor", "Stridor or facial swelling", Immediate)
            .with_discriminator("history-of-anaphylaxis", "History of anaphylaxis", VeryUrgent)
            .with_discriminator("widespread-urticaria", "Widespread urticaria", Urgent)
            .with_discriminator("local-reaction", "Local reaction only", NonUrgent),
        PresentingComplaint::new("mental-health-crisis", "Mental Health Crisis")
            .with_discriminator("active-self-harm", "Active self-harm in progress", Immediate)
            .with_discriminator("high-risk-of-harm", "High risk of harm to self or others", VeryUrgent)
            .with_discriminator("acutely-distressed", "Acutely distressed or agitated", Urgent)
            .with_discriminator("low-mood-no-plan", "Low mood without plan or intent", Standard),
        PresentingComplaint::new("unwell-adult", "Unwell Adult")
            .with_discriminator("unwell-adult-shock", "Signs of shock", Immediate)
            .with_discriminator("new-confusion", "New confusion or altered behaviour", VeryUrgent)
            .with_discriminator("hot-to-touch", "Hot to touch", Urgent)
            .with_discriminator("recent-problem", "Recent problem, otherwise well", NonUrgent),
    ]
}
