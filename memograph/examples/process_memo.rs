//! Ingest a memo and query it back.
//!
//! Requires a reachable Neo4j instance and an LLM API key:
//!
//! ```bash
//! MEMOGRAPH_GRAPH__URI=bolt://localhost:7687 \
//! MEMOGRAPH_LLM__API_KEY=... \
//! cargo run --example process_memo
//! ```

use memograph::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let memograph = memograph::init_with_defaults().await?;

    let report = memograph
        .process_memo("오늘 ABC상사 김성길 과장님을 만났다. 전화번호는 010-2222-1234")
        .await?;
    println!(
        "persisted: {}, memo: {:?}, relationship failures: {}",
        report.persisted, report.memo_id, report.relationship_failures
    );
    for entity in &report.entities {
        println!("  entity: {:?} {:?}", entity.entity_type, entity.name);
    }

    let answer = memograph.ask("김성길 전화번호?").await?;
    println!("query:  {}", answer.query);
    println!("answer: {}", answer.answer);

    for memo in memograph.recent_memos(None).await? {
        println!("memo {} @ {}: {}", memo.id, memo.timestamp, memo.text);
    }

    memograph.close().await
}
