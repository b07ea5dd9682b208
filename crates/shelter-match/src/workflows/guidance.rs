//! Post-adoption support text for new families.

use serde::{Deserialize, Serialize};

/// Topic of an adopter's follow-up question, picked by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernCategory {
    Behavioral,
    Anxiety,
    Training,
    Health,
    General,
}

impl ConcernCategory {
    /// First matching group wins, in declaration order.
    pub fn classify(concern: &str) -> Self {
        const GROUPS: &[(ConcernCategory, &[&str])] = &[
            (ConcernCategory::Behavioral, &["aggressive", "behavior"]),
            (ConcernCategory::Anxiety, &["scared", "afraid", "anxious"]),
            (ConcernCategory::Training, &["training", "obedience"]),
            (ConcernCategory::Health, &["health", "sick"]),
        ];

        let concern = concern.to_lowercase();
        GROUPS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| concern.contains(keyword)))
            .map(|(category, _)| *category)
            .unwrap_or(ConcernCategory::General)
    }

    fn response(self, animal_name: &str) -> String {
        match self {
            ConcernCategory::Behavioral => format!(
                "BEHAVIORAL CONCERNS:\n\
{animal_name} may need time to feel secure. Consider:\n\
- Working with a professional trainer\n\
- Using positive reinforcement techniques\n\
- Consulting your veterinarian for any medical causes\n\
- Patience - behavioral change takes weeks/months\n"
            ),
            ConcernCategory::Anxiety => format!(
                "ANXIETY/FEAR CONCERNS:\n\
{animal_name} may have had a difficult past. Tips:\n\
- Create a safe, quiet space initially\n\
- Gradually introduce to new environments\n\
- Use calming techniques (music, pheromone products)\n\
- Let them set the pace for interaction\n\
- Consider anxiety medication if severe\n"
            ),
            ConcernCategory::Training => "TRAINING TIPS:\n\
- Start with basic commands (sit, stay, come)\n\
- Use positive reinforcement (treats, praise)\n\
- Keep sessions short (5-10 minutes)\n\
- Be consistent with commands\n\
- Consider professional training if needed\n"
                .to_string(),
            ConcernCategory::Health => "HEALTH CONCERNS:\n\
- Schedule a vet checkup within first week\n\
- Keep vaccination records up to date\n\
- Monitor for signs of illness\n\
- Report any health issues immediately to veterinarian\n\
- Ask about pet insurance for ongoing care\n"
                .to_string(),
            ConcernCategory::General => format!(
                "GENERAL SUPPORT:\n\
The shelter and veterinarian are your best resources.\n\
{animal_name} needs time to adjust. Be patient and celebrate progress!\n"
            ),
        }
    }
}

/// Guidance handed to an adopter after they take an animal home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostAdoptionGuidance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concern: Option<ConcernCategory>,
    pub text: String,
}

pub fn post_adoption_guidance(
    animal_name: &str,
    animal_breed: &str,
    adopter_name: &str,
    concern: Option<&str>,
) -> PostAdoptionGuidance {
    let mut text = format!(
        "POST-ADOPTION GUIDANCE FOR {adopter_name}\n\
{rule}\n\n\
Congratulations on adopting {animal_name}, a {animal_breed}!\n\n\
FIRST WEEK TIPS:\n\
1. Create a safe space for {animal_name} with familiar items\n\
2. Establish a consistent routine (feeding, play, rest)\n\
3. Let {animal_name} explore your home gradually\n\
4. Be patient - adjustment takes time (2-4 weeks)\n\
5. Maintain contact with the shelter if questions arise\n\n\
BUILDING THE BOND:\n\
- Spend quality time together daily\n\
- Use positive reinforcement (treats, praise)\n\
- Be consistent with rules and boundaries\n\
- Exercise regularly (appropriate for the breed)\n\
- Provide mental stimulation\n\n\
WHEN TO SEEK HELP:\n\
- Behavioral issues emerge\n\
- Health concerns develop\n\
- Significant anxiety or aggression\n\
- Struggling with adjustment\n\n\
RESOURCES:\n\
- Contact your local shelter for support\n\
- Veterinary guidance for health questions\n\
- Professional trainer if needed\n\n\
Remember: Every adoption is unique. Be patient and celebrate small wins!\n",
        rule = "=".repeat(50),
    );

    // Blank concerns get the base text only.
    let concern = concern
        .map(str::trim)
        .filter(|concern| !concern.is_empty())
        .map(ConcernCategory::classify);
    if let Some(category) = concern {
        text.push_str("\nYOUR SPECIFIC CONCERN:\n");
        text.push_str(&category.response(animal_name));
    }

    PostAdoptionGuidance { concern, text }
}

pub fn training_tips(species: &str, breed: &str, age_years: u32, behavior: &str) -> String {
    format!(
        "TRAINING GUIDE: {breed}\n\
{rule}\n\n\
ANIMAL: {breed} ({species}), Age: {age_years} years\n\
BEHAVIOR TO ADDRESS: {behavior}\n\n\
GENERAL APPROACH:\n\
1. Use positive reinforcement (treats, praise)\n\
2. Keep sessions short (10-15 minutes)\n\
3. Practice daily for consistency\n\
4. Be patient - training takes weeks\n\
5. Never use punishment or force\n\n\
NEXT STEPS:\n\
1. Identify the trigger for {behavior}\n\
2. Use redirection techniques\n\
3. Reward desired behavior immediately\n\
4. If issues persist, consult a professional trainer\n\n\
TIMELINE:\n\
- Week 1-2: Initial understanding\n\
- Week 3-4: Noticeable improvement\n\
- Week 5+: Behavioral habits forming\n\n\
If concerns persist, seek professional help.\n",
        rule = "=".repeat(50),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concerns_classify_by_keyword() {
        assert_eq!(
            ConcernCategory::classify("He's a bit anxious"),
            ConcernCategory::Anxiety
        );
        assert_eq!(
            ConcernCategory::classify("Growling, AGGRESSIVE at the door"),
            ConcernCategory::Behavioral
        );
        assert_eq!(
            ConcernCategory::classify("obedience classes?"),
            ConcernCategory::Training
        );
        assert_eq!(
            ConcernCategory::classify("seems sick"),
            ConcernCategory::Health
        );
        assert_eq!(
            ConcernCategory::classify("what food brand"),
            ConcernCategory::General
        );
    }

    #[test]
    fn earlier_groups_take_precedence() {
        assert_eq!(
            ConcernCategory::classify("scared and showing training regression"),
            ConcernCategory::Anxiety
        );
    }

    #[test]
    fn base_guidance_names_everyone() {
        let guidance = post_adoption_guidance("Max", "Golden Retriever", "John Smith", None);

        assert!(guidance.concern.is_none());
        assert!(guidance.text.starts_with("POST-ADOPTION GUIDANCE FOR John Smith"));
        assert!(guidance
            .text
            .contains("Congratulations on adopting Max, a Golden Retriever!"));
        assert!(!guidance.text.contains("YOUR SPECIFIC CONCERN"));
    }

    #[test]
    fn concern_section_is_appended() {
        let guidance = post_adoption_guidance(
            "Max",
            "Golden Retriever",
            "John Smith",
            Some("He's a bit anxious"),
        );

        assert_eq!(guidance.concern, Some(ConcernCategory::Anxiety));
        assert!(guidance.text.contains("YOUR SPECIFIC CONCERN:\nANXIETY/FEAR CONCERNS:"));
        assert!(guidance.text.contains("Max may have had a difficult past."));
    }

    #[test]
    fn blank_concern_is_ignored() {
        let guidance = post_adoption_guidance("Max", "Golden Retriever", "John", Some("   "));
        assert!(guidance.concern.is_none());
    }

    #[test]
    fn training_tips_mention_behavior() {
        let tips = training_tips("Dog", "Beagle", 2, "barking");

        assert!(tips.starts_with("TRAINING GUIDE: Beagle"));
        assert!(tips.contains("ANIMAL: Beagle (Dog), Age: 2 years"));
        assert!(tips.contains("Identify the trigger for barking"));
    }
}
