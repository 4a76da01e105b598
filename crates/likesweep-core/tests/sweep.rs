//! Sweep engine tests against an in-memory repository.
//!
//! Time is paused so the fixed throttling delays resolve instantly while
//! still being observable through `tokio::time::Instant`.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::Instant;

use likesweep_core::error::ProtocolError;
use likesweep_core::{
    AtUri, Credentials, DeleteOutcome, Did, Error, ListRecordsOutput, Nsid, PdsUrl, Progress,
    Prompter, Record, Reporter, Result, Rkey, Session, SweepConfig, collect_all, delete_all,
};

// ============================================================================
// Fakes
// ============================================================================

enum Page {
    Records(Vec<Record>, Option<&'static str>),
    Fail,
}

struct FakeSession {
    did: Did,
    pds: PdsUrl,
    pages: Vec<Page>,
    fails_delete: fn(usize) -> bool,
    list_calls: Mutex<Vec<(Option<u32>, Option<String>)>>,
    delete_calls: Mutex<Vec<(Did, Nsid, Rkey)>>,
}

impl FakeSession {
    fn new(pages: Vec<Page>) -> Self {
        Self {
            did: Did::new("did:plc:sweeper").unwrap(),
            pds: PdsUrl::new("https://pds.example.com").unwrap(),
            pages,
            fails_delete: |_| false,
            list_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_deletes(mut self, fails: fn(usize) -> bool) -> Self {
        self.fails_delete = fails;
        self
    }

    fn cursors_requested(&self) -> Vec<Option<String>> {
        self.list_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, cursor)| cursor.clone())
            .collect()
    }

    fn deleted_rkeys(&self) -> Vec<String> {
        self.delete_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, rkey)| rkey.to_string())
            .collect()
    }
}

fn server_error() -> Error {
    ProtocolError::new(
        500,
        Some("InternalServerError".to_string()),
        Some("boom".to_string()),
    )
    .into()
}

#[async_trait]
impl Session for FakeSession {
    fn did(&self) -> &Did {
        &self.did
    }

    fn handle(&self) -> &str {
        "sweeper.test"
    }

    fn pds(&self) -> &PdsUrl {
        &self.pds
    }

    async fn list_records(
        &self,
        _repo: &Did,
        _collection: &Nsid,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<ListRecordsOutput> {
        let call = {
            let mut calls = self.list_calls.lock().unwrap();
            calls.push((limit, cursor.map(str::to_string)));
            calls.len() - 1
        };

        match self.pages.get(call) {
            Some(Page::Records(records, next)) => Ok(ListRecordsOutput {
                records: records.clone(),
                cursor: next.map(str::to_string),
            }),
            Some(Page::Fail) => Err(server_error()),
            None => Ok(ListRecordsOutput::default()),
        }
    }

    async fn delete_record(&self, repo: &Did, collection: &Nsid, rkey: &Rkey) -> Result<()> {
        let call = {
            let mut calls = self.delete_calls.lock().unwrap();
            calls.push((repo.clone(), collection.clone(), rkey.clone()));
            calls.len()
        };

        if (self.fails_delete)(call) {
            Err(server_error())
        } else {
            Ok(())
        }
    }
}

/// Answers questions from a script, then falls back to a default.
struct ScriptedPrompter {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    fn always(answer: bool) -> Self {
        Self::script(&[], answer)
    }

    fn script(answers: &[bool], fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            fallback,
            asked: Mutex::new(Vec::new()),
        }
    }

    fn questions(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials::new("sweeper.test", "secret"))
    }

    async fn confirm(&self, question: &str) -> Result<bool> {
        self.asked.lock().unwrap().push(question.to_string());
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback))
    }
}

struct FailingPrompter;

#[async_trait]
impl Prompter for FailingPrompter {
    async fn credentials(&self) -> Result<Credentials> {
        Err(Error::prompt("stdin closed"))
    }

    async fn confirm(&self, _question: &str) -> Result<bool> {
        Err(Error::prompt("stdin closed"))
    }
}

#[derive(Default)]
struct RecordingReporter {
    pages: Mutex<Vec<usize>>,
    stopped: Mutex<Vec<usize>>,
    started: Mutex<Vec<usize>>,
    failures: Mutex<Vec<usize>>,
    progress: Mutex<Vec<Progress>>,
    trips: Mutex<Vec<Progress>>,
}

impl Reporter for RecordingReporter {
    fn page_collected(&self, total: usize) {
        self.pages.lock().unwrap().push(total);
    }

    fn listing_stopped(&self, collected: usize, _error: &Error) {
        self.stopped.lock().unwrap().push(collected);
    }

    fn deletion_started(&self, total: usize) {
        self.started.lock().unwrap().push(total);
    }

    fn delete_failed(&self, index: usize, _record: &Record, _error: &Error) {
        self.failures.lock().unwrap().push(index);
    }

    fn progress(&self, progress: &Progress) {
        self.progress.lock().unwrap().push(*progress);
    }

    fn breaker_tripped(&self, progress: &Progress) {
        self.trips.lock().unwrap().push(*progress);
    }
}

fn like(n: usize) -> Record {
    Record {
        uri: AtUri::new(format!("at://did:plc:sweeper/app.bsky.feed.like/like{n:05}")).unwrap(),
        cid: format!("bafylike{n}"),
        value: json!({
            "$type": "app.bsky.feed.like",
            "subject": { "uri": format!("at://did:plc:other/app.bsky.feed.post/post{n}"), "cid": "bafypost" },
            "createdAt": "2024-11-20T09:15:00.000Z"
        }),
    }
}

fn likes(range: std::ops::Range<usize>) -> Vec<Record> {
    range.map(like).collect()
}

fn uris(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.uri.to_string()).collect()
}

// ============================================================================
// Collection
// ============================================================================

#[tokio::test(start_paused = true)]
async fn collects_pages_in_server_order_until_empty_page() {
    let session = FakeSession::new(vec![
        Page::Records(likes(0..3), Some("c1")),
        Page::Records(likes(3..6), Some("c2")),
        Page::Records(likes(6..8), Some("c3")),
        Page::Records(vec![], Some("c4")),
    ]);
    let reporter = RecordingReporter::default();

    let listing = collect_all(&session, &Nsid::likes(), &SweepConfig::default(), &reporter).await;

    assert!(listing.is_complete());
    assert_eq!(listing.pages, 3);
    assert_eq!(uris(&listing.records), uris(&likes(0..8)));
    assert_eq!(
        session.cursors_requested(),
        vec![
            None,
            Some("c1".to_string()),
            Some("c2".to_string()),
            Some("c3".to_string())
        ]
    );
    assert_eq!(*reporter.pages.lock().unwrap(), vec![3, 6, 8]);
}

#[tokio::test(start_paused = true)]
async fn fetches_one_page_without_cursor() {
    let session = FakeSession::new(vec![
        Page::Records(likes(0..100), None),
        Page::Records(likes(100..200), None),
    ]);

    let listing = collect_all(
        &session,
        &Nsid::likes(),
        &SweepConfig::default(),
        &likesweep_core::NoopReporter,
    )
    .await;

    assert!(listing.is_complete());
    assert_eq!(listing.len(), 100);
    assert_eq!(session.cursors_requested(), vec![None]);
}

#[tokio::test(start_paused = true)]
async fn empty_cursor_ends_listing() {
    let session = FakeSession::new(vec![
        Page::Records(likes(0..2), Some("")),
        Page::Records(likes(2..4), None),
    ]);

    let listing = collect_all(
        &session,
        &Nsid::likes(),
        &SweepConfig::default(),
        &likesweep_core::NoopReporter,
    )
    .await;

    assert_eq!(listing.len(), 2);
    assert_eq!(session.cursors_requested().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn requests_configured_page_size() {
    let session = FakeSession::new(vec![Page::Records(likes(0..1), None)]);
    let config = SweepConfig {
        page_limit: 25,
        ..SweepConfig::default()
    };

    collect_all(&session, &Nsid::likes(), &config, &likesweep_core::NoopReporter).await;

    assert_eq!(session.list_calls.lock().unwrap()[0].0, Some(25));
}

#[tokio::test(start_paused = true)]
async fn error_mid_pagination_keeps_earlier_pages() {
    let session = FakeSession::new(vec![
        Page::Records(likes(0..3), Some("c1")),
        Page::Records(likes(3..6), Some("c2")),
        Page::Fail,
        Page::Records(likes(6..9), Some("c4")),
        Page::Records(likes(9..12), None),
    ]);
    let reporter = RecordingReporter::default();

    let listing = collect_all(&session, &Nsid::likes(), &SweepConfig::default(), &reporter).await;

    assert!(!listing.is_complete());
    assert!(matches!(listing.stopped, Some(Error::Protocol(ref e)) if e.status == 500));
    assert_eq!(uris(&listing.records), uris(&likes(0..6)));
    assert_eq!(session.cursors_requested().len(), 3);
    assert_eq!(*reporter.stopped.lock().unwrap(), vec![6]);
}

#[tokio::test(start_paused = true)]
async fn error_on_first_page_yields_empty_listing() {
    let session = FakeSession::new(vec![Page::Fail]);

    let listing = collect_all(
        &session,
        &Nsid::likes(),
        &SweepConfig::default(),
        &likesweep_core::NoopReporter,
    )
    .await;

    assert!(listing.is_empty());
    assert!(!listing.is_complete());
}

#[tokio::test(start_paused = true)]
async fn pauses_between_listing_requests() {
    let session = FakeSession::new(vec![
        Page::Records(likes(0..1), Some("c1")),
        Page::Records(likes(1..2), Some("c2")),
        Page::Records(likes(2..3), None),
    ]);

    let start = Instant::now();
    collect_all(
        &session,
        &Nsid::likes(),
        &SweepConfig::default(),
        &likesweep_core::NoopReporter,
    )
    .await;

    // Two pauses: after page one and after page two.
    assert_eq!(start.elapsed(), Duration::from_millis(200));
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test(start_paused = true)]
async fn empty_input_makes_no_calls_and_no_prompt() {
    let session = FakeSession::new(vec![]);
    let prompter = ScriptedPrompter::always(true);

    let outcome = delete_all(
        &session,
        &Nsid::likes(),
        &[],
        &prompter,
        &likesweep_core::NoopReporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, DeleteOutcome::Empty);
    assert_eq!(outcome.tally().deleted, 0);
    assert_eq!(outcome.tally().errors, 0);
    assert!(prompter.questions().is_empty());
    assert!(session.delete_calls.lock().unwrap().is_empty());
    assert!(session.list_calls.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn declined_confirmation_deletes_nothing() {
    let session = FakeSession::new(vec![]);
    let prompter = ScriptedPrompter::always(false);
    let reporter = RecordingReporter::default();

    let outcome = delete_all(
        &session,
        &Nsid::likes(),
        &likes(0..5),
        &prompter,
        &reporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(
        prompter.questions(),
        vec!["Are you sure you want to delete 5 likes?".to_string()]
    );
    assert!(session.delete_calls.lock().unwrap().is_empty());
    assert!(reporter.started.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn deletes_in_order_scoped_to_session_repo() {
    let session = FakeSession::new(vec![]);
    let records = likes(0..4);

    let outcome = delete_all(
        &session,
        &Nsid::likes(),
        &records,
        &ScriptedPrompter::always(true),
        &likesweep_core::NoopReporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    let tally = outcome.tally();
    assert!(matches!(outcome, DeleteOutcome::Finished(_)));
    assert_eq!((tally.deleted, tally.errors, tally.attempted), (4, 0, 4));
    assert_eq!(
        session.deleted_rkeys(),
        vec!["like00000", "like00001", "like00002", "like00003"]
    );
    for (repo, collection, _) in session.delete_calls.lock().unwrap().iter() {
        assert_eq!(repo.as_str(), "did:plc:sweeper");
        assert_eq!(collection.as_str(), "app.bsky.feed.like");
    }
}

#[tokio::test(start_paused = true)]
async fn every_seventh_failure_with_continue_tallies_86_and_14() {
    let session = FakeSession::new(vec![]).failing_deletes(|call| call % 7 == 0);
    let prompter = ScriptedPrompter::always(true);
    let reporter = RecordingReporter::default();

    let outcome = delete_all(
        &session,
        &Nsid::likes(),
        &likes(0..100),
        &prompter,
        &reporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    let tally = outcome.tally();
    assert!(matches!(outcome, DeleteOutcome::Finished(_)));
    assert_eq!(tally.deleted, 86);
    assert_eq!(tally.errors, 14);
    assert_eq!(tally.attempted, 100);
    assert_eq!(session.delete_calls.lock().unwrap().len(), 100);

    // The breaker is checked after failures only: the 6th through 14th
    // failures (indices 42..=98) each run above 10%.
    let trips: Vec<usize> = reporter.trips.lock().unwrap().iter().map(|p| p.index).collect();
    assert_eq!(trips, vec![42, 49, 56, 63, 70, 77, 84, 91, 98]);
    assert_eq!(prompter.questions().len(), 1 + trips.len());
    assert!(
        prompter.questions()[1..]
            .iter()
            .all(|q| q == "Many errors occurred. Continue?")
    );
}

#[tokio::test(start_paused = true)]
async fn operator_can_halt_when_breaker_trips() {
    let session = FakeSession::new(vec![]).failing_deletes(|_| true);
    let prompter = ScriptedPrompter::script(&[true], false);
    let records = likes(0..40);

    let outcome = delete_all(
        &session,
        &Nsid::likes(),
        &records,
        &prompter,
        &likesweep_core::NoopReporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    let DeleteOutcome::Halted(tally) = outcome else {
        panic!("expected a halted run, got {outcome:?}");
    };
    assert_eq!((tally.deleted, tally.errors, tally.attempted), (0, 6, 6));
    assert_eq!(tally.untouched(records.len()), 34);
    assert_eq!(session.delete_calls.lock().unwrap().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn few_failures_never_prompt() {
    // Five failures in a row is 100% but not more than five errors.
    let session = FakeSession::new(vec![]).failing_deletes(|call| call <= 5);
    let prompter = ScriptedPrompter::always(true);

    let outcome = delete_all(
        &session,
        &Nsid::likes(),
        &likes(0..20),
        &prompter,
        &likesweep_core::NoopReporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.tally().errors, 5);
    assert_eq!(outcome.tally().deleted, 15);
    assert_eq!(prompter.questions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn progress_on_every_tenth_and_last_record() {
    // The last record fails; progress is still reported for it.
    let session = FakeSession::new(vec![]).failing_deletes(|call| call == 25);
    let reporter = RecordingReporter::default();

    delete_all(
        &session,
        &Nsid::likes(),
        &likes(0..25),
        &ScriptedPrompter::always(true),
        &reporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    let progress = reporter.progress.lock().unwrap().clone();
    let indices: Vec<usize> = progress.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![10, 20, 25]);

    let last = progress.last().unwrap();
    assert_eq!((last.deleted, last.errors, last.total), (24, 1, 25));
    assert_eq!(last.to_string(), "24 deleted, 1 errors (100.0%)");
    assert_eq!(*reporter.failures.lock().unwrap(), vec![25]);
    assert_eq!(*reporter.started.lock().unwrap(), vec![25]);
}

#[tokio::test(start_paused = true)]
async fn pauses_after_every_attempt() {
    let session = FakeSession::new(vec![]).failing_deletes(|call| call == 2);

    let start = Instant::now();
    delete_all(
        &session,
        &Nsid::likes(),
        &likes(0..3),
        &ScriptedPrompter::always(true),
        &likesweep_core::NoopReporter,
        &SweepConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(start.elapsed(), Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn failing_prompt_is_an_error() {
    let session = FakeSession::new(vec![]);

    let result = delete_all(
        &session,
        &Nsid::likes(),
        &likes(0..3),
        &FailingPrompter,
        &likesweep_core::NoopReporter,
        &SweepConfig::default(),
    )
    .await;

    assert!(matches!(result, Err(Error::Prompt { .. })));
    assert!(session.delete_calls.lock().unwrap().is_empty());
}
