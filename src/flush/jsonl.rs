use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::{LedgerEntry, TurnOutcome};

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush an applicator ledger to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 2 files:
/// - `outcomes.jsonl` — applied/expired/decayed entries, one per line
/// - `reputation.jsonl` — reputation tag changes, one per line
pub fn flush_ledger_to_jsonl(ledger: &[LedgerEntry], output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(
        &output_dir.join("outcomes.jsonl"),
        ledger
            .iter()
            .filter(|entry| !matches!(entry.outcome, TurnOutcome::TagAdded { .. })),
    )?;
    write_jsonl(
        &output_dir.join("reputation.jsonl"),
        ledger
            .iter()
            .filter(|entry| matches!(entry.outcome, TurnOutcome::TagAdded { .. })),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConsequenceEffect, EffectType, ReputationTag, ResourceType};

    fn sample_ledger() -> Vec<LedgerEntry> {
        let mut effect =
            ConsequenceEffect::new(ResourceType::PublicTrust, EffectType::Immediate, 0.2);
        effect.actual_applied = 0.3;
        effect.is_applied = true;
        vec![
            LedgerEntry {
                turn: 1,
                outcome: TurnOutcome::Applied { effect },
            },
            LedgerEntry {
                turn: 1,
                outcome: TurnOutcome::TagAdded {
                    tag: ReputationTag::new("crisis_handler", 0.3, 20, "crisis"),
                },
            },
            LedgerEntry {
                turn: 2,
                outcome: TurnOutcome::Decayed {
                    resource: ResourceType::MediaInfluence,
                    bloc: None,
                    delta: -0.1,
                },
            },
        ]
    }

    #[test]
    fn writes_outcomes_and_reputation_files() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = sample_ledger();
        flush_ledger_to_jsonl(&ledger, dir.path()).unwrap();

        let outcomes = std::fs::read_to_string(dir.path().join("outcomes.jsonl")).unwrap();
        assert_eq!(outcomes.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(outcomes.lines().next().unwrap()).unwrap();
        assert_eq!(first["turn"], 1);
        assert_eq!(first["outcome"]["type"], "applied");

        let reputation = std::fs::read_to_string(dir.path().join("reputation.jsonl")).unwrap();
        assert_eq!(reputation.lines().count(), 1);
        let tag: serde_json::Value =
            serde_json::from_str(reputation.lines().next().unwrap()).unwrap();
        assert_eq!(tag["outcome"]["tag"]["name"], "crisis_handler");
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("checkpoints").join("turn_004");
        flush_ledger_to_jsonl(&sample_ledger(), &nested).unwrap();
        assert!(nested.join("outcomes.jsonl").exists());
    }
}
