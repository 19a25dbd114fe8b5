//! QA tests for library discovery, corpus loading and progress files.
//!
//! Run with: `cargo test -p scratch-core --test qa_library`

use scratch_core::library::{self, LibraryError};
use scratch_core::progress::{ANSWER_FILE, QUESTION_FILE, TEMP_FILE};
use scratch_core::{
    CorpusVersion, GameConfig, GameStatus, ProgressWriter, SampleError, ScratchSession,
    SessionConfig, SessionError,
};
use std::fs;
use std::path::Path;

fn write_library(root: &Path, dir: &str, name: &str, version: &str, lists: &[(&str, &str)]) {
    let lib = root.join(dir);
    fs::create_dir_all(lib.join("dict")).unwrap();
    let dicts: Vec<String> = lists.iter().map(|(file, _)| format!("\"{file}\"")).collect();
    fs::write(
        lib.join("dict.toml"),
        format!(
            "name = \"{name}\"\nversion = \"{version}\"\ndicts = [{}]\n",
            dicts.join(", ")
        ),
    )
    .unwrap();
    for (file, content) in lists {
        fs::write(lib.join("dict").join(file), content).unwrap();
    }
}

fn sample_dicts(root: &Path) {
    write_library(
        root,
        "b_chunithm",
        "CHUNITHM",
        "VERSE",
        &[("songs.txt", "Ghost Rule\r\nTell Your World\r\n")],
    );
    write_library(
        root,
        "a_maimai",
        "maimai DX",
        "PRiSM",
        &[
            ("main.txt", "Tell Your World\nGhost Rule\n\nSpecialist\n"),
            ("missing.txt", ""),
        ],
    );
    // Not a library: no manifest.
    fs::create_dir_all(root.join("notes")).unwrap();
    // Broken manifest is skipped.
    fs::create_dir_all(root.join("c_broken")).unwrap();
    fs::write(root.join("c_broken").join("dict.toml"), "name = 3").unwrap();
}

#[tokio::test]
async fn test_discover_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    sample_dicts(dir.path());

    let libraries = library::discover(dir.path()).await.unwrap();
    let names: Vec<&str> = libraries.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["maimai DX", "CHUNITHM"]);
    assert_eq!(
        libraries[1].corpus_version(),
        CorpusVersion::new("CHUNITHM", "VERSE")
    );
}

#[tokio::test]
async fn test_discover_missing_folder() {
    let dir = tempfile::tempdir().unwrap();
    let result = library::discover(dir.path().join("nowhere")).await;
    assert!(matches!(result, Err(LibraryError::DictFolder { .. })));
}

#[tokio::test]
async fn test_corpus_is_merged_and_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    sample_dicts(dir.path());
    let libraries = library::discover(dir.path()).await.unwrap();

    // "missing.txt" is removed after discovery: it is skipped, not fatal.
    fs::remove_file(dir.path().join("a_maimai/dict/missing.txt")).unwrap();

    let corpus = library::load_corpus(&libraries).await;
    let titles: Vec<&str> = corpus.iter().map(String::as_str).collect();
    assert_eq!(titles, vec!["Ghost Rule", "Specialist", "Tell Your World"]);
}

#[tokio::test]
async fn test_selected_subset_only() {
    let dir = tempfile::tempdir().unwrap();
    sample_dicts(dir.path());
    let libraries = library::discover(dir.path()).await.unwrap();

    let selection = library::parse_selection("2, 5", libraries.len()).unwrap();
    assert_eq!(selection.ignored, vec![5]);
    let corpus =
        library::load_corpus(selection.indices.iter().map(|&i| &libraries[i - 1])).await;
    assert_eq!(corpus.len(), 2);
}

#[tokio::test]
async fn test_full_game_writes_progress() {
    let dir = tempfile::tempdir().unwrap();
    let dicts = dir.path().join("dicts");
    sample_dicts(&dicts);
    fs::write(
        dir.path().join("configuration.toml"),
        "[const]\ngenerate_amount = 3\nguess_chances = 2\n\n[path]\ndict_folder = \"dicts\"\noutput_folder = \"output\"\n",
    )
    .unwrap();

    let config = GameConfig::load(dir.path().join("configuration.toml"))
        .await
        .unwrap();
    let libraries = library::discover(&config.path.dict_folder).await.unwrap();
    let corpus = library::load_corpus(&libraries).await;
    let versions = libraries.iter().map(|l| l.corpus_version()).collect();

    let writer = ProgressWriter::create(&config.path.output_folder)
        .await
        .unwrap();
    let mut session = ScratchSession::new(&SessionConfig::from_game_config(&config), corpus, versions)
        .unwrap()
        .with_progress(writer);
    session.begin().await.unwrap();

    let output = dir.path().join("output");
    let answers = fs::read_to_string(output.join(ANSWER_FILE)).unwrap();
    assert_eq!(answers.lines().count(), 3);
    let questions = fs::read_to_string(output.join(QUESTION_FILE)).unwrap();
    assert!(questions.lines().all(|l| l.ends_with('*')));

    session.execute("os").await;
    let temp = fs::read_to_string(output.join(TEMP_FILE)).unwrap();
    assert!(temp.starts_with("Known characters: space.\n"));

    for index in 1..=3 {
        session.execute(&format!("check {index}")).await;
    }
    assert_eq!(session.status(), GameStatus::Solved);
    session.finish().await;

    let temp = fs::read_to_string(output.join(TEMP_FILE)).unwrap();
    for title in session.answers() {
        assert!(temp.contains(title.as_str()));
    }
}

#[tokio::test]
async fn test_corpus_too_small_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    sample_dicts(dir.path());
    let libraries = library::discover(dir.path()).await.unwrap();
    let corpus = library::load_corpus(&libraries).await;

    let result = ScratchSession::new(&SessionConfig::new(10, 5), corpus, Vec::new());
    assert!(matches!(
        result,
        Err(SessionError::Sample(SampleError::CorpusTooSmall {
            requested: 10,
            available: 3
        }))
    ));
}
