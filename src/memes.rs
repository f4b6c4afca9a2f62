use rand::Rng;

/// A captionable meme template known to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemeTemplate {
    pub name: &'static str,
    /// Provider template id
    pub id: &'static str,
    /// What the two caption slots mean, phrased for the model
    pub instructions: &'static str,
}

pub static CATALOG: [MemeTemplate; 8] = [
    MemeTemplate {
        name: "Drake",
        id: "61579",
        instructions: "Create a short, funny meme text for a Drake meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: Something wrong/confusing about the topic. Second phrase: The right way to understand it. Example: 'Not understanding polynomials' | 'Getting the math vibes'",
    },
    MemeTemplate {
        name: "GalaxyBrain",
        id: "147635",
        instructions: "Create a short, funny meme text for a Galaxy Brain meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: A basic/obvious thought about the topic. Second phrase: A next-level or genius insight about the topic. Example: 'Just memorizing formulas' | 'Actually understanding math'",
    },
    MemeTemplate {
        name: "Pigeon",
        id: "100777631",
        instructions: "Create a short, funny meme text for a Pigeon meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: A common misconception about the topic. Second phrase: The correct or surprising fact. Example: 'All birds can fly' | 'Penguins are birds too'",
    },
    MemeTemplate {
        name: "DistractedBoyfriend",
        id: "112126428",
        instructions: "Create a short, funny meme text for a Distracted Boyfriend meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: The thing you should focus on. Second phrase: The thing that distracts you. Example: 'Studying for finals' | 'Scrolling memes'",
    },
    MemeTemplate {
        name: "TwoButtons",
        id: "87743020",
        instructions: "Create a short, funny meme text for a Two Buttons meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: The first difficult choice. Second phrase: The second difficult choice. Example: 'Do homework' | 'Take a nap'",
    },
    MemeTemplate {
        name: "ExpandingBrain",
        id: "93895088",
        instructions: "Create a short, funny meme text for an Expanding Brain meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: A basic/normal way to do something. Second phrase: A galaxy-brain/next-level way. Example: 'Using calculator' | 'Mental math like a boss'",
    },
    MemeTemplate {
        name: "ChangeMyMind",
        id: "129242436",
        instructions: "Create a short, funny meme text for a Change My Mind meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: A controversial or funny opinion. Second phrase: A challenge or rebuttal. Example: 'Math is fun' | 'Change my mind'",
    },
    MemeTemplate {
        name: "UNO",
        id: "217743513",
        instructions: "Create a short, funny meme text for a UNO Draw 25 meme template. Return ONLY two short phrases (max 8 words each) separated by a pipe (|): First phrase: Something you refuse to do. Second phrase: The consequence (Draw 25). Example: 'Do my homework' | 'Draw 25'",
    },
];

pub fn by_name(name: &str) -> Option<&'static MemeTemplate> {
    CATALOG.iter().find(|t| t.name == name)
}

/// Chooses one template per lesson.
pub trait TemplatePicker: Send + Sync {
    fn pick(&self) -> &'static MemeTemplate;
}

/// Uniform choice over the whole catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl TemplatePicker for RandomPicker {
    fn pick(&self) -> &'static MemeTemplate {
        &CATALOG[rand::thread_rng().gen_range(0..CATALOG.len())]
    }
}

/// Always the same template. Falls back to Drake for unknown names.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(&'static MemeTemplate);

impl FixedPicker {
    pub fn new(name: &str) -> Self {
        Self(by_name(name).unwrap_or(&CATALOG[0]))
    }
}

impl TemplatePicker for FixedPicker {
    fn pick(&self) -> &'static MemeTemplate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_eight_distinct_templates() {
        let names: HashSet<_> = CATALOG.iter().map(|t| t.name).collect();
        let ids: HashSet<_> = CATALOG.iter().map(|t| t.id).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(ids.len(), 8);
        for t in CATALOG.iter() {
            assert!(t.instructions.contains("separated by a pipe (|)"), "{}", t.name);
        }
    }

    #[test]
    fn test_random_picker_stays_in_catalog() {
        let picker = RandomPicker;
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let t = picker.pick();
            assert!(by_name(t.name).is_some());
            seen.insert(t.name);
        }
        // 500 uniform draws over 8 templates miss one with negligible probability
        assert_eq!(seen.len(), CATALOG.len());
    }

    #[test]
    fn test_fixed_picker() {
        assert_eq!(FixedPicker::new("TwoButtons").pick().id, "87743020");
        assert_eq!(FixedPicker::new("nope").pick().name, "Drake");
    }
}
