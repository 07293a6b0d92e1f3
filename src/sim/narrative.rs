//! Narrative and headline rendering. Fixed templates keyed on the outcome
//! and event metadata only, so text is fully reproducible from inputs.

use crate::model::{EventType, NewsGameEvent, ResponseOption};

use super::context::ConsequenceContext;

/// Player-facing summary of how the chosen response played out.
pub fn response_narrative(
    event: &NewsGameEvent,
    response: &ResponseOption,
    is_success: bool,
    ctx: &ConsequenceContext<'_>,
) -> String {
    let player = &ctx.player_name;
    let party = &ctx.party_name;
    let headline = &event.headline;
    let label = &response.label;

    match (event.event_type, is_success) {
        (EventType::Crisis, true) => format!(
            "{player} moves decisively on \"{headline}\". {label} steadies the news cycle, \
             and {party} closes ranks behind the response."
        ),
        (EventType::Crisis, false) => format!(
            "{player} tries {label} as \"{headline}\" spirals, but the response lands flat \
             and the crisis deepens on every channel."
        ),
        (EventType::Scandal, true) => format!(
            "Facing \"{headline}\", {player} opts for {label}. The story loses steam before \
             the weekend shows can sink their teeth in."
        ),
        (EventType::Scandal, false) => format!(
            "{player} answers \"{headline}\" with {label}, and the press smells blood. \
             {party} operatives spend the week on damage control."
        ),
        (EventType::Policy, true) => format!(
            "{player} turns \"{headline}\" into a platform moment: {label} reads as \
             competence, and {party} staffers circulate the clips."
        ),
        (EventType::Policy, false) => format!(
            "{label} was meant to own \"{headline}\", but the rollout stumbles and the \
             wonks pick the numbers apart."
        ),
        (EventType::Opportunity, true) => format!(
            "{player} seizes the moment on \"{headline}\". {label} lands cleanly and earns \
             a favorable news cycle."
        ),
        (EventType::Opportunity, false) => format!(
            "The opening from \"{headline}\" slips away; {label} arrives a beat too late to \
             matter."
        ),
        (EventType::Gaffe, true) => format!(
            "{player} defuses \"{headline}\" with {label}; by morning the clip is a punchline \
             instead of a liability."
        ),
        (EventType::Gaffe, false) => format!(
            "{label} only feeds the loop. \"{headline}\" runs another full day, with \
             {party} surrogates squirming through interviews."
        ),
    }
}

/// The headline the media runs after the response.
pub fn media_headline(
    event: &NewsGameEvent,
    response: &ResponseOption,
    is_success: bool,
    ctx: &ConsequenceContext<'_>,
) -> String {
    let player = &ctx.player_name;
    let label = &response.label;
    if is_success {
        match event.event_type {
            EventType::Crisis => format!("{player} Takes Charge as Crisis Eases"),
            EventType::Scandal => format!("{player} Weathers the Storm"),
            EventType::Policy => format!("{player}'s \"{label}\" Wins the Day"),
            EventType::Opportunity => format!("{player} Capitalizes on the Moment"),
            EventType::Gaffe => format!("{player} Laughs Off the Misstep"),
        }
    } else {
        match event.event_type {
            EventType::Crisis => format!("Response Falters as Crisis Grows; {player} Under Fire"),
            EventType::Scandal => format!("Questions Mount Over {player}'s \"{label}\""),
            EventType::Policy => format!("{player}'s \"{label}\" Falls Flat"),
            EventType::Opportunity => format!("{player} Misses the Moment"),
            EventType::Gaffe => format!("{player} Can't Shake the Clip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UrgencyLevel;
    use crate::sim::stance::StanceHistoryTracker;
    use crate::testutil::baseline_context;

    fn crisis_event() -> NewsGameEvent {
        NewsGameEvent::new(
            "ev_1",
            "Dam failure upstate",
            "infrastructure",
            EventType::Crisis,
            UrgencyLevel::Breaking,
        )
    }

    #[test]
    fn narrative_is_deterministic() {
        let stances = StanceHistoryTracker::default();
        let ctx = baseline_context(&[], &stances);
        let event = crisis_event();
        let response = ResponseOption::new("opt_1", "Deploy emergency services");
        let a = response_narrative(&event, &response, true, &ctx);
        let b = response_narrative(&event, &response, true, &ctx);
        assert_eq!(a, b);
        assert!(a.contains("Dam failure upstate"));
        assert!(a.contains(&ctx.player_name));
    }

    #[test]
    fn success_and_failure_read_differently() {
        let stances = StanceHistoryTracker::default();
        let ctx = baseline_context(&[], &stances);
        let event = crisis_event();
        let response = ResponseOption::new("opt_1", "Deploy emergency services");
        let won = media_headline(&event, &response, true, &ctx);
        let lost = media_headline(&event, &response, false, &ctx);
        assert_ne!(won, lost);
    }
}
