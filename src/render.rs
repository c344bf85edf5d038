//! Presentation layer: roster announcements, ASCII bracket, match narration.
//!
//! The orchestrator only talks to the [`Renderer`] trait; display failures
//! never reach the engine.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::battle::MatchReport;
use crate::model::Creature;

/// Placeholder shown for bracket slots that are not decided yet.
pub const UNRESOLVED_SLOT: &str = "????????";

/// Names known for each bracket round; `None` until that round is drawn.
#[derive(Clone, Debug, Default)]
pub struct BracketView {
    pub quarterfinals: Option<Vec<String>>,
    pub semifinals: Option<Vec<String>>,
    pub finals: Option<Vec<String>>,
    pub champion: Option<String>,
}

impl BracketView {
    /// Record the participants of a round; rounds outside the standard
    /// 8/4/2 bracket shape are ignored by the diagram.
    pub fn record_round(&mut self, participants: &[Creature]) {
        let names: Vec<String> = participants.iter().map(|c| c.name.clone()).collect();
        match names.len() {
            8 => self.quarterfinals = Some(names),
            4 => self.semifinals = Some(names),
            2 => self.finals = Some(names),
            _ => {}
        }
    }

    pub fn record_champion(&mut self, champion: &Creature) {
        self.champion = Some(champion.name.clone());
    }

    fn slot(&self, round: &Option<Vec<String>>, index: usize) -> String {
        let name = round
            .as_ref()
            .and_then(|names| names.get(index))
            .map(String::as_str)
            .unwrap_or(UNRESOLVED_SLOT);
        format!("{name:^10.10}")
    }
}

/// Consumes read-only snapshots of the tournament as it unfolds.
pub trait Renderer {
    fn scouting(&mut self, count: usize);
    fn roster_announced(&mut self, creatures: &[Creature]);
    fn bracket_updated(&mut self, bracket: &BracketView);
    fn stage_started(&mut self, stage: &str);
    fn match_started(&mut self, stage: &str, number: usize, first: &Creature, second: &Creature);
    fn match_resolved(&mut self, report: &MatchReport, winner: &Creature, loser: &Creature);
    fn advancing(&mut self, stage: &str, creatures: &[Creature]);
    fn champion_crowned(&mut self, champion: &Creature);
}

/// Renderer that swallows everything; used headless and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentRenderer;

impl Renderer for SilentRenderer {
    fn scouting(&mut self, _count: usize) {}
    fn roster_announced(&mut self, _creatures: &[Creature]) {}
    fn bracket_updated(&mut self, _bracket: &BracketView) {}
    fn stage_started(&mut self, _stage: &str) {}
    fn match_started(&mut self, _stage: &str, _number: usize, _first: &Creature, _second: &Creature) {
    }
    fn match_resolved(&mut self, _report: &MatchReport, _winner: &Creature, _loser: &Creature) {}
    fn advancing(&mut self, _stage: &str, _creatures: &[Creature]) {}
    fn champion_crowned(&mut self, _champion: &Creature) {}
}

/// Textual narration with optional pacing between lines.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    pace: Duration,
}

impl ConsoleRenderer<io::Stdout> {
    /// Stdout narration paced so the play-by-play can be read along.
    pub fn stdout_paced() -> Self {
        Self::new(io::stdout(), Duration::from_millis(1_500))
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, pace: Duration) -> Self {
        Self { out, pace }
    }

    fn emit(&mut self, text: &str) {
        if let Err(error) = writeln!(self.out, "{text}") {
            warn!(%error, "renderer write failed");
        }
    }

    fn pause(&self) {
        if !self.pace.is_zero() {
            thread::sleep(self.pace);
        }
    }

    fn name_list(creatures: &[Creature]) -> String {
        match creatures {
            [] => String::new(),
            [only] => format!("{}!", only.name),
            [rest @ .., last] => {
                let head: Vec<&str> = rest.iter().map(|c| c.name.as_str()).collect();
                format!("{}, and {}!", head.join(", "), last.name)
            }
        }
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn scouting(&mut self, count: usize) {
        self.emit(&format!(
            "Scouting {count} Pokemon to participate in the tournament...\n"
        ));
    }

    fn roster_announced(&mut self, creatures: &[Creature]) {
        self.emit("The chosen Pokemon are:");
        self.emit(&Self::name_list(creatures));
        self.pause();
    }

    fn bracket_updated(&mut self, bracket: &BracketView) {
        let champion = bracket
            .champion
            .as_deref()
            .map(|name| format!("{name:^10.10}"))
            .unwrap_or_else(|| "    |     ".to_string());
        let f = |i| bracket.slot(&bracket.finals, i);
        let s = |i| bracket.slot(&bracket.semifinals, i);
        let q = |i| bracket.slot(&bracket.quarterfinals, i);
        let lines = [
            format!("{:^62}", "Champion"),
            format!("{champion:^62}"),
            format!("{:^62}", "------------------------------------------"),
            format!("{:^62}", "|                 Final                  |"),
            format!("    {}                                          {}", f(0), f(1)),
            format!("    {:^10}                                          {:^10}", "|", "|"),
            format!("  {:^14}                                  {:^14}", "--------------", "--------------"),
            format!("  {:^14}                                  {:^14}", "| Semifinal 1 |", "| Semifinal 2 |"),
            format!(" {}  {}                      {}  {}", s(0), s(1), s(2), s(3)),
            format!(" {:^10}  {:^10}                      {:^10}  {:^10}", "|", "|", "|", "|"),
            format!(" {:^10}  {:^10}                      {:^10}  {:^10}", "-----", "-----", "-----", "-----"),
            format!(
                "{} {} {} {}  {} {} {} {}",
                q(0), q(1), q(2), q(3), q(4), q(5), q(6), q(7)
            ),
        ];
        self.emit("");
        for line in lines {
            self.emit(&line);
        }
        self.emit("");
        self.pause();
    }

    fn stage_started(&mut self, stage: &str) {
        debug!(stage, "stage starting");
    }

    fn match_started(&mut self, stage: &str, number: usize, first: &Creature, second: &Creature) {
        self.emit(&format!("\n#####  {stage} - Match {number}  #####"));
        self.emit(&format!(
            "#####    {} Vs. {}!    #####\n",
            first.name, second.name
        ));
        self.pause();
    }

    fn match_resolved(&mut self, report: &MatchReport, winner: &Creature, loser: &Creature) {
        if let Some(opening) = report.attacks.first() {
            self.emit(&format!(
                "{} is faster and gets the first attack!\n",
                opening.attacker
            ));
            self.pause();
        }
        for attack in &report.attacks {
            self.emit(&format!(
                "{}'s HP = {}     {}'s HP = {}",
                attack.attacker, attack.attacker_health, attack.defender, attack.defender_health_before
            ));
            self.emit(&format!(
                "{} attacks {} and deals {} damage!\n",
                attack.attacker, attack.defender, attack.damage
            ));
            self.pause();
        }
        if report.adjudicated {
            self.emit(&format!(
                "Neither side can land a blow; the judges stop the match and call it for {}!",
                winner.name
            ));
        } else {
            self.emit(&format!("{} faints!", loser.name));
        }
        self.emit(&format!("{} is victorious!", winner.name));
        self.pause();
    }

    fn advancing(&mut self, stage: &str, creatures: &[Creature]) {
        self.emit(&format!("\nThe Pokemon advancing to the {stage} are:"));
        self.emit(&Self::name_list(creatures));
        self.pause();
    }

    fn champion_crowned(&mut self, champion: &Creature) {
        self.emit(&format!(
            "\nThe champion of the tournament is {}, congratulations!",
            champion.name
        ));
        self.emit(TROPHY);
    }
}

const TROPHY: &str = r#"
                  ___________
                 '._==_==_=_.'
                 .-\:      /-.
                | (|:.     |) |
                 '-|:.     |-'
                   \::.    /
                    '::. .'
                      ) (
                    _.' '._
                 ''''''''''''''
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn make_creature(name: &str) -> Creature {
        Creature {
            id: 0,
            name: name.to_string(),
            attack: 10,
            defense: 10,
            speed: 10,
            max_health: 100,
            current_health: 100,
            types: vec!["normal".to_string()],
            double_damage_types: HashSet::new(),
            half_damage_types: HashSet::new(),
            no_damage_types: HashSet::new(),
        }
    }

    #[test]
    fn bracket_records_rounds_by_size() {
        let mut bracket = BracketView::default();
        let quarter: Vec<Creature> = (0..8).map(|i| make_creature(&format!("Q{i}"))).collect();
        let semi: Vec<Creature> = (0..4).map(|i| make_creature(&format!("S{i}"))).collect();
        bracket.record_round(&quarter);
        bracket.record_round(&semi);
        assert_eq!(bracket.quarterfinals.as_ref().map(Vec::len), Some(8));
        assert_eq!(bracket.semifinals.as_ref().map(Vec::len), Some(4));
        assert!(bracket.finals.is_none());
    }

    #[test]
    fn undrawn_slots_render_as_placeholders() {
        let bracket = BracketView::default();
        let slot = bracket.slot(&bracket.finals, 0);
        assert_eq!(slot.trim(), UNRESOLVED_SLOT);
    }

    #[test]
    fn long_names_are_truncated_to_slot_width() {
        let mut bracket = BracketView::default();
        let finalists = vec![make_creature("Crabominable"), make_creature("Mew")];
        bracket.record_round(&finalists);
        let slot = bracket.slot(&bracket.finals, 0);
        assert_eq!(slot.len(), 10);
    }

    #[test]
    fn console_renderer_writes_roster_and_bracket() {
        let mut buffer = Vec::new();
        {
            let mut renderer = ConsoleRenderer::new(&mut buffer, Duration::ZERO);
            let roster: Vec<Creature> = (0..8).map(|i| make_creature(&format!("Mon{i}"))).collect();
            renderer.roster_announced(&roster);
            let mut bracket = BracketView::default();
            bracket.record_round(&roster);
            renderer.bracket_updated(&bracket);
        }
        let text = String::from_utf8(buffer).expect("utf8 output");
        assert!(text.contains("The chosen Pokemon are:"));
        assert!(text.contains("Mon0, Mon1"));
        assert!(text.contains("and Mon7!"));
        assert!(text.contains("Champion"));
        assert!(text.contains(UNRESOLVED_SLOT));
    }
}
