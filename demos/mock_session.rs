//! Drives a full judgment session against the mock backend and prints the
//! resulting qrel export.
//!
//! ```sh
//! cargo run --example mock_session --features mock
//! ```

use std::sync::Arc;
use std::time::Duration;

use qrel_judge::backend::MockSearchBackend;
use qrel_judge::model::{Document, Grade};
use qrel_judge::session::{Intent, MemoryQueryStore, Session, SessionConfig};

#[tokio::main]
async fn main() {
    let backend = Arc::new(MockSearchBackend::new());
    backend.insert_response(
        "rust async",
        vec![
            Document::new("http://docs.example/async-book"),
            Document::new("http://blog.example/pinning"),
            Document::new("http://forum.example/executor-thread"),
        ],
    );

    let mut session = Session::new(
        Arc::clone(&backend),
        MemoryQueryStore::new(),
        SessionConfig {
            query_id: "demo-1".to_string(),
            assessor_id: "alex".to_string(),
            ..SessionConfig::default()
        },
    );

    session.handle(Intent::TextChanged("rust async".to_string()));
    tokio::time::sleep(Duration::from_millis(400)).await;
    session.next_outcome().await.expect("search outcome");

    session.handle(Intent::GradeClicked {
        id: "http://docs.example/async-book".to_string(),
        grade: Grade::level(2).expect("valid grade"),
    });
    session.handle(Intent::GradeClicked {
        id: "http://forum.example/executor-thread".to_string(),
        grade: Grade::level(0).expect("valid grade"),
    });

    let snapshot = session.snapshot();
    println!("query: {:?}", snapshot.text);
    for doc in &snapshot.documents {
        println!("  [{}] {}", doc.grade, doc.id);
    }

    println!("\nqrel export:");
    print!("{}", String::from_utf8_lossy(&session.export()));
}
