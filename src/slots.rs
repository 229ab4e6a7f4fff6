//! Typed role→filler slot frame.
//!
//! The grammar engine hands back a stringly-keyed slot map; `SlotFrame`
//! converts it to a typed record at the boundary, stripping qualifier
//! suffixes (`Name.Qualifier` → `Name`) from every value.

use std::collections::HashMap;

/// Role assignments for one generated sentence.
///
/// Only the slots the grammar happened to use are populated. `case` exists
/// only for sentences explicitly marked passive; `final_q` only when the
/// grammar pins which role the final review question asks about. Role keys
/// outside the known set are kept in `extras`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotFrame {
    pub agent: Option<String>,
    pub action: Option<String>,
    pub patient: Option<String>,
    /// Name of the modifier role present in this sentence, e.g. "Instrument"
    pub modifier: Option<String>,
    pub instrument: Option<String>,
    pub location: Option<String>,
    pub recipient: Option<String>,
    pub adverb: Option<String>,
    /// "Passive" forces the passive builder; any other value forces active
    pub case: Option<String>,
    /// Pinned role for the final review question
    pub final_q: Option<String>,
    pub extras: HashMap<String, String>,
}

/// Drop a qualifier suffix from a slot value, keeping the base name.
fn strip_qualifier(value: &str) -> &str {
    match value.split_once('.') {
        Some((base, _)) => base,
        None => value,
    }
}

impl SlotFrame {
    /// Build a frame from the grammar engine's slot map.
    pub fn from_map(slots: &HashMap<String, String>) -> Self {
        let mut frame = SlotFrame::default();
        for (key, raw) in slots {
            let value = strip_qualifier(raw).to_string();
            match key.as_str() {
                "Agent" => frame.agent = Some(value),
                "Action" => frame.action = Some(value),
                "Patient" => frame.patient = Some(value),
                "Mod" => frame.modifier = Some(value),
                "Instrument" => frame.instrument = Some(value),
                "Location" => frame.location = Some(value),
                "Recipient" => frame.recipient = Some(value),
                "Adverb" => frame.adverb = Some(value),
                "Case" => frame.case = Some(value),
                "FinalQ" => frame.final_q = Some(value),
                _ => {
                    frame.extras.insert(key.clone(), value);
                }
            }
        }
        frame
    }

    /// The filler assigned to a role, by role name.
    pub fn filler_for(&self, role: &str) -> Option<&str> {
        let known = match role {
            "Agent" => self.agent.as_deref(),
            "Action" => self.action.as_deref(),
            "Patient" => self.patient.as_deref(),
            "Instrument" => self.instrument.as_deref(),
            "Location" => self.location.as_deref(),
            "Recipient" => self.recipient.as_deref(),
            "Adverb" => self.adverb.as_deref(),
            _ => None,
        };
        known.or_else(|| self.extras.get(role).map(|s| s.as_str()))
    }

    pub fn is_passive(&self) -> bool {
        self.case.as_deref() == Some("Passive")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn qualifier_suffixes_are_stripped() {
        let frame = SlotFrame::from_map(&map(&[
            ("Agent", "Schoolgirl.Subj"),
            ("Action", "Stirred"),
        ]));
        assert_eq!(frame.agent.as_deref(), Some("Schoolgirl"));
        assert_eq!(frame.action.as_deref(), Some("Stirred"));
    }

    #[test]
    fn filler_lookup_covers_known_roles_and_extras() {
        let frame = SlotFrame::from_map(&map(&[
            ("Patient", "Koolaid"),
            ("Instrument", "Spoon"),
            ("CoAgent", "Teacher"),
        ]));
        assert_eq!(frame.filler_for("Patient"), Some("Koolaid"));
        assert_eq!(frame.filler_for("Instrument"), Some("Spoon"));
        assert_eq!(frame.filler_for("CoAgent"), Some("Teacher"));
        assert_eq!(frame.filler_for("Location"), None);
    }

    #[test]
    fn case_is_honored_literally() {
        let passive = SlotFrame::from_map(&map(&[("Case", "Passive")]));
        assert!(passive.is_passive());
        let active = SlotFrame::from_map(&map(&[("Case", "Active")]));
        assert!(!active.is_passive());
        assert!(!SlotFrame::default().is_passive());
    }
}
