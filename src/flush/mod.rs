mod jsonl;

pub use jsonl::flush_ledger_to_jsonl;
