use std::sync::Arc;

use transcript_editor::repository::InMemoryTranscriptRepository;
use transcript_editor::transcript::SequentialIdGenerator;
use transcript_editor::{
    EditorConfig, EditorSession, ExportOptions, FileTranscriptRepository, Segment, SessionError,
    Speaker, Transcript, TranscriptRepository,
};

fn interview() -> Transcript {
    Transcript::new(
        "en",
        vec![
            Segment::new("s1", 0.0, 4.0, "Hello"),
            Segment::new("s2", 4.0, 8.0, "World"),
            Segment::new("s3", 9.0, 12.0, "How are you?"),
        ],
    )
    .with_title("Interview")
}

fn snapshot(transcript: &Transcript) -> serde_json::Value {
    serde_json::to_value(transcript).unwrap()
}

async fn session_with(repo: Arc<dyn TranscriptRepository>) -> EditorSession {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    EditorSession::create(repo, interview(), EditorConfig::default())
        .await
        .expect("session created")
        .with_id_generator(Arc::new(SequentialIdGenerator::new("new")))
}

#[tokio::test]
async fn edits_are_persisted_in_order() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let mut session = session_with(repo.clone()).await;
    let id = session.transcript().id.clone();

    session.update_title("Weekly interview");
    assert!(session.update_text("s2", "Everyone"));
    assert!(session.combine_with_next(0));
    session.flush().await;

    let stored = repo.fetch_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Weekly interview");
    assert_eq!(stored.segments.len(), 2);
    assert_eq!(stored.segments[0].text, "Hello Everyone");
    assert_eq!(stored.segments[0].end, 8.0);
    assert_eq!(session.save_stats().failed(), 0);
    assert_eq!(session.save_stats().succeeded(), 3);
}

#[tokio::test]
async fn undo_everything_restores_the_original() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let mut session = session_with(repo.clone()).await;
    let original = snapshot(session.transcript());

    session.add_new_segment_after(0);
    session.duplicate_segment(2);
    assert!(session.delete_segment(0));
    session.alternate_default_speakers();
    assert!(session.update_start_time("s3", 8.5));
    assert!(session.update_end_time("s3", 12.5));
    assert!(session.update_speaker("s2", Speaker::new("Ann")));
    let after_edits = snapshot(session.transcript());

    while session.undo().is_some() {}
    assert_eq!(snapshot(session.transcript()), original);
    assert!(!session.is_undo_available());

    while session.redo().is_some() {}
    assert_eq!(snapshot(session.transcript()), after_edits);
    assert!(!session.is_redo_available());

    session.undo();
    session.undo();
    session.flush().await;
    let stored = repo.fetch_by_id(&session.transcript().id).await.unwrap().unwrap();
    assert_eq!(snapshot(&stored), snapshot(session.transcript()));
}

#[tokio::test]
async fn new_segment_fills_the_gap_after_index() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let mut session = session_with(repo).await;

    let id = session.add_new_segment_after(1).unwrap();
    assert_eq!(id, "new-1");

    let segment = session.transcript().segment_at(2).unwrap();
    assert_eq!(segment.id, "new-1");
    assert_eq!((segment.start, segment.end), (8.0, 9.0));
    assert_eq!(segment.text, "");
    assert_eq!(segment.speaker, Some(Speaker::new("unknown")));

    let tail = session.add_new_segment_after(3).unwrap();
    let segment = session.transcript().segment(&tail).unwrap();
    assert_eq!((segment.start, segment.end), (12.0, 12.0));

    assert_eq!(session.add_new_segment_after(99), None);
}

#[tokio::test]
async fn out_of_range_and_unknown_targets_do_nothing() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let mut session = session_with(repo).await;
    let original = snapshot(session.transcript());

    assert!(!session.delete_segment(10));
    assert!(!session.combine_with_next(2));
    assert_eq!(session.duplicate_segment(7), None);
    assert!(!session.update_text("ghost", "boo"));

    assert_eq!(snapshot(session.transcript()), original);
    assert!(!session.is_undo_available());
}

#[tokio::test]
async fn new_edit_after_undo_drops_redo() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let mut session = session_with(repo).await;

    session.update_title("one");
    session.update_title("two");
    assert_eq!(session.undo(), Some("Rename transcript"));
    assert!(session.is_redo_available());

    session.update_title("three");
    assert!(!session.is_redo_available());
    assert_eq!(session.redo(), None);
    assert_eq!(session.transcript().title, "three");
    assert_eq!(session.history().undo_depth(), 2);
}

#[tokio::test]
async fn import_replaces_segments_and_clears_history() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let mut session = session_with(repo).await;
    let id = session.transcript().id.clone();
    session.update_title("Before import");

    let count = session
        .import_plain_text("(00:00,000 - 00:02,000) Ann: Hi\n\n(00:02,000 - 00:03,500) Bob: Hey")
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(session.transcript().id, id);
    assert_eq!(session.transcript().title, "Before import");
    assert!(!session.is_undo_available());

    session.set_export_options(ExportOptions {
        include_timestamps: false,
        ..ExportOptions::default()
    });
    assert_eq!(session.export_preview(), "Ann: Hi\nBob: Hey");
}

#[tokio::test]
async fn export_round_trips_through_import() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let mut session = session_with(repo).await;
    session.alternate_speakers(vec![Speaker::new("A"), Speaker::new("B")]);
    let exported = session.export_preview();

    session.import_plain_text(&exported).unwrap();

    let texts: Vec<&str> = session.transcript().segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "World", "How are you?"]);
    let speakers: Vec<String> = session
        .transcript()
        .segments
        .iter()
        .filter_map(|s| s.speaker.as_ref().map(|sp| sp.name.clone()))
        .collect();
    assert_eq!(speakers, vec!["A", "B", "A"]);
    assert_eq!(session.transcript().segments[2].start, 9.0);
    assert_eq!(session.transcript().segments[2].end, 12.0);
}

#[tokio::test]
async fn reopening_from_disk_sees_last_state() {
    let dir = tempfile::tempdir().unwrap();
    let repo: Arc<dyn TranscriptRepository> =
        Arc::new(FileTranscriptRepository::open(dir.path()).await.unwrap());

    let mut session = session_with(repo.clone()).await;
    let id = session.transcript().id.clone();
    session.update_text("s1", "Hi");
    session.delete_segment(2);
    let closed = session.close().await;

    let reopened = EditorSession::open(repo.clone(), &id, EditorConfig::default())
        .await
        .unwrap();
    assert_eq!(snapshot(reopened.transcript()), snapshot(&closed));
    assert!(!reopened.is_undo_available());

    reopened.delete().await.unwrap();
    assert!(matches!(
        EditorSession::open(repo, &id, EditorConfig::default()).await,
        Err(SessionError::NotFound(_))
    ));
}

#[tokio::test]
async fn creating_twice_is_rejected() {
    let repo = Arc::new(InMemoryTranscriptRepository::new());
    let transcript = interview();

    let first = EditorSession::create(repo.clone(), transcript.clone(), EditorConfig::default())
        .await
        .unwrap();
    let second = EditorSession::create(repo, transcript, EditorConfig::default()).await;

    assert!(matches!(second, Err(SessionError::Repository(_))));
    first.close().await;
}
