//! Visitor goal selection and the content policy derived from it
//!
//! The goal is the only personalization input. Everything downstream
//! (service ordering, section layout, contact copy) is a pure function of it.

use serde::{Deserialize, Serialize};

use crate::content::Service;

/// The visitor's declared intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Nothing chosen yet (or reset via the logo)
    #[default]
    None,
    Customers,
    Brand,
    Event,
    Content,
    Explore,
}

impl Goal {
    /// Goals offered by the path selector, in display order
    pub const SELECTABLE: [Goal; 5] = [
        Goal::Customers,
        Goal::Brand,
        Goal::Event,
        Goal::Content,
        Goal::Explore,
    ];

    /// Identifier used in `data-goal` attributes
    pub fn id(&self) -> &'static str {
        match self {
            Goal::None => "none",
            Goal::Customers => "customers",
            Goal::Brand => "brand",
            Goal::Event => "event",
            Goal::Content => "content",
            Goal::Explore => "explore",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Some(Goal::None),
            "customers" => Some(Goal::Customers),
            "brand" => Some(Goal::Brand),
            "event" => Some(Goal::Event),
            "content" => Some(Goal::Content),
            "explore" => Some(Goal::Explore),
            _ => None,
        }
    }

    /// Human-readable label (journey log, hero confirmation)
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Goal::None => None,
            Goal::Customers => Some("Get More Customers"),
            Goal::Brand => Some("Build Your Brand"),
            Goal::Event => Some("Cover an Event"),
            Goal::Content => Some("Regular Content"),
            Goal::Explore => Some("Just Exploring"),
        }
    }

    /// Contact form message placeholder tuned to the goal
    pub fn message_placeholder(&self) -> &'static str {
        match self {
            Goal::Customers => {
                "Tell me about your business. What's working? What's not getting the traction you expected?"
            }
            Goal::Brand => {
                "What's the gap between how your business actually is and how it looks online?"
            }
            Goal::Event => {
                "Tell me about your event. Date, location, what you're hoping to capture."
            }
            Goal::Content => {
                "What does your marketing team need help with? What keeps falling off the list?"
            }
            Goal::Explore => "Not sure where to start? Just tell me what's on your mind.",
            Goal::None => {
                "What's going on with your business right now? What are you trying to figure out?"
            }
        }
    }

    /// Whether the goal-specific hero is shown
    pub fn shows_goal_hero(&self) -> bool {
        *self != Goal::None
    }
}

/// Service categories the goals prioritize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    VideoProduction,
    SocialContentCreation,
    CommercialPhotography,
    EventCoverage,
}

impl ServiceCategory {
    /// Matches `Service::id` in the content files
    pub fn id(&self) -> &'static str {
        match self {
            ServiceCategory::VideoProduction => "video-production",
            ServiceCategory::SocialContentCreation => "social-content-creation",
            ServiceCategory::CommercialPhotography => "commercial-photography",
            ServiceCategory::EventCoverage => "event-coverage",
        }
    }
}

/// Ordering of the page's middle sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionOrder {
    Default,
    /// Action-oriented: services lead
    ServicesFirst,
    /// Social proof leads
    TrustFirst,
}

/// Page sections whose position depends on the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Services,
    PromoVideo,
    Process,
    Clients,
    About,
}

impl Section {
    /// Identifier used in `data-section` attributes
    pub fn id(&self) -> &'static str {
        match self {
            Section::Services => "services",
            Section::PromoVideo => "promo",
            Section::Process => "process",
            Section::Clients => "clients",
            Section::About => "about",
        }
    }
}

impl SectionOrder {
    /// Rendered sequence between the hero and the contact form
    pub fn sections(&self) -> [Section; 5] {
        use Section::*;
        match self {
            SectionOrder::Default => [Services, PromoVideo, Process, About, Clients],
            SectionOrder::ServicesFirst => [Services, PromoVideo, Process, Clients, About],
            SectionOrder::TrustFirst => [Clients, Services, PromoVideo, Process, About],
        }
    }
}

/// Service priority for a goal. `None` means keep the natural order.
pub fn priority_order(goal: Goal) -> Option<[ServiceCategory; 4]> {
    use ServiceCategory::*;
    match goal {
        Goal::None | Goal::Explore => None,
        Goal::Customers => Some([
            VideoProduction,
            SocialContentCreation,
            CommercialPhotography,
            EventCoverage,
        ]),
        Goal::Brand => Some([
            CommercialPhotography,
            VideoProduction,
            SocialContentCreation,
            EventCoverage,
        ]),
        Goal::Event => Some([
            EventCoverage,
            CommercialPhotography,
            VideoProduction,
            SocialContentCreation,
        ]),
        Goal::Content => Some([
            SocialContentCreation,
            VideoProduction,
            CommercialPhotography,
            EventCoverage,
        ]),
    }
}

pub fn section_order(goal: Goal) -> SectionOrder {
    match goal {
        Goal::None | Goal::Explore => SectionOrder::Default,
        Goal::Customers | Goal::Content => SectionOrder::ServicesFirst,
        Goal::Brand | Goal::Event => SectionOrder::TrustFirst,
    }
}

/// Services to show for a goal.
///
/// Without a priority the natural list is returned unchanged. Otherwise only
/// the prioritized categories are kept, in priority order; categories with
/// no matching record are skipped.
pub fn prioritize_services(goal: Goal, services: &[Service]) -> Vec<Service> {
    let Some(order) = priority_order(goal) else {
        return services.to_vec();
    };
    order
        .iter()
        .filter_map(|category| services.iter().find(|s| s.id == category.id()))
        .cloned()
        .collect()
}

/// Goal state machine with an append-only journey log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalSelector {
    goal: Goal,
    /// Display/analytics only, never consulted for control decisions
    journey: Vec<String>,
}

impl GoalSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active goal. Selecting `Goal::None` resets.
    pub fn select(&mut self, goal: Goal) {
        let Some(label) = goal.label() else {
            self.reset();
            return;
        };
        log::info!("Goal selected: {} (was {})", goal.id(), self.goal.id());
        self.goal = goal;
        self.journey.push(format!("goal:{label}"));
    }

    /// Back to no goal (idempotent)
    pub fn reset(&mut self) {
        if self.goal != Goal::None {
            log::info!("Goal reset from {}", self.goal.id());
        }
        self.goal = Goal::None;
        self.journey.clear();
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn journey(&self) -> &[String] {
        &self.journey
    }

    pub fn section_order(&self) -> SectionOrder {
        section_order(self.goal)
    }

    pub fn priority_order(&self) -> Option<[ServiceCategory; 4]> {
        priority_order(self.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str) -> Service {
        Service {
            id: id.to_string(),
            title: id.to_string(),
            ..Service::default()
        }
    }

    fn catalog() -> Vec<Service> {
        vec![
            service("commercial-photography"),
            service("event-coverage"),
            service("video-production"),
            service("social-content-creation"),
        ]
    }

    const ALL: [Goal; 6] = [
        Goal::None,
        Goal::Customers,
        Goal::Brand,
        Goal::Event,
        Goal::Content,
        Goal::Explore,
    ];

    #[test]
    fn test_section_order_covers_every_goal() {
        let expected = [
            SectionOrder::Default,
            SectionOrder::ServicesFirst,
            SectionOrder::TrustFirst,
            SectionOrder::TrustFirst,
            SectionOrder::ServicesFirst,
            SectionOrder::Default,
        ];
        for (goal, want) in ALL.iter().zip(expected) {
            assert_eq!(section_order(*goal), want, "goal {:?}", goal);
        }
    }

    #[test]
    fn test_priority_orders_are_permutations_led_by_intent() {
        let leads = [
            (Goal::Customers, ServiceCategory::VideoProduction),
            (Goal::Brand, ServiceCategory::CommercialPhotography),
            (Goal::Event, ServiceCategory::EventCoverage),
            (Goal::Content, ServiceCategory::SocialContentCreation),
        ];
        for (goal, lead) in leads {
            let order = priority_order(goal).unwrap();
            assert_eq!(order[0], lead);
            let mut ids: Vec<_> = order.iter().map(|c| c.id()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 4);
        }
        assert!(priority_order(Goal::None).is_none());
        assert!(priority_order(Goal::Explore).is_none());
    }

    #[test]
    fn test_goal_journey_scenario() {
        let mut sel = GoalSelector::new();
        sel.select(Goal::Customers);
        assert_eq!(sel.section_order(), SectionOrder::ServicesFirst);
        let services = prioritize_services(sel.goal(), &catalog());
        assert_eq!(services[0].id, "video-production");
        assert_eq!(sel.journey(), ["goal:Get More Customers"]);

        sel.reset();
        assert_eq!(sel.goal(), Goal::None);
        assert_eq!(sel.section_order(), SectionOrder::Default);
        assert!(sel.journey().is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut sel = GoalSelector::new();
        sel.reset();
        sel.reset();
        assert_eq!(sel.goal(), Goal::None);

        sel.select(Goal::Event);
        sel.reset();
        let once = sel.goal();
        sel.reset();
        assert_eq!(sel.goal(), once);
    }

    #[test]
    fn test_select_replaces_and_logs() {
        let mut sel = GoalSelector::new();
        sel.select(Goal::Brand);
        sel.select(Goal::Explore);
        assert_eq!(sel.goal(), Goal::Explore);
        assert_eq!(sel.journey(), ["goal:Build Your Brand", "goal:Just Exploring"]);
        sel.select(Goal::None);
        assert_eq!(sel.goal(), Goal::None);
    }

    #[test]
    fn test_natural_order_for_explore_and_missing_ids_skipped() {
        let all = catalog();
        let natural = prioritize_services(Goal::Explore, &all);
        assert_eq!(natural, all);

        let partial = vec![service("event-coverage"), service("video-production")];
        let ids: Vec<_> = prioritize_services(Goal::Brand, &partial)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, ["video-production", "event-coverage"]);
    }

    #[test]
    fn test_sections_are_permutations() {
        for order in [
            SectionOrder::Default,
            SectionOrder::ServicesFirst,
            SectionOrder::TrustFirst,
        ] {
            let mut ids: Vec<_> = order.sections().iter().map(|s| s.id()).collect();
            ids.sort();
            assert_eq!(ids, ["about", "clients", "process", "promo", "services"]);
        }
        assert_eq!(SectionOrder::TrustFirst.sections()[0], Section::Clients);
    }

    #[test]
    fn test_goal_ids_round_trip_and_reject_unknown() {
        for goal in ALL {
            assert_eq!(Goal::from_id(goal.id()), Some(goal));
        }
        assert_eq!(Goal::from_id("weddings"), None);
        assert!(!Goal::None.shows_goal_hero());
        assert!(Goal::Explore.shows_goal_hero());
    }
}
