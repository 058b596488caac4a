//! Integration tests for the generate command.

use pos_ticket_producer::commands::{run_generate, GenerateArgs};
use pos_ticket_producer::ticket_generator::TicketRecord;

fn generate(count: u64, seed: Option<u64>) -> Vec<TicketRecord> {
    let mut out = Vec::new();
    run_generate(&GenerateArgs { count, seed }, &mut out).unwrap();

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_generate_writes_one_record_per_line() {
    let records = generate(25, Some(42));
    assert_eq!(records.len(), 25);

    for record in &records {
        assert!(!record.articles.is_empty());
        assert!(record.articles.len() <= 10);
        assert!((1..=3).contains(&record.magasin_id));
        assert!(
            chrono::NaiveDateTime::parse_from_str(&record.date, "%Y-%m-%d %H:%M:%S").is_ok()
        );
    }
}

#[test]
fn test_generate_same_seed_same_articles() {
    let first = generate(10, Some(7));
    let second = generate(10, Some(7));

    let articles = |records: &[TicketRecord]| {
        records
            .iter()
            .map(|r| (r.articles.clone(), r.magasin_id))
            .collect::<Vec<_>>()
    };
    assert_eq!(articles(&first), articles(&second));
}

#[test]
fn test_generate_without_seed() {
    let records = generate(3, None);
    assert_eq!(records.len(), 3);
}
