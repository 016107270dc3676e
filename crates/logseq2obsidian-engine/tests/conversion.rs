use std::fs;
use std::path::{Path, PathBuf};

use logseq2obsidian_engine::{
    ConversionReport, ConvertOptions, Converter, DuplicateTitles, IoError, parse_page_file,
    render_page,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pages")
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn converts_fixture_pages() {
    let out = TempDir::new().unwrap();

    let report = Converter::default()
        .run(&fixtures_dir(), out.path())
        .unwrap();

    assert_eq!(
        report,
        ConversionReport {
            parsed: 4,
            written: 4,
            skipped: 0,
            failed: 0,
            dropped_lines: 1,
        }
    );
    assert_eq!(
        read(out.path(), "Outline.md"),
        "top one\n\ntop two\n\nnested one\n\nnested two\ncontinues here\n\n\
         deepest with [[Link]]\n\ntop three\n\ntop four\n\n"
    );
    assert_eq!(
        read(out.path(), "Projects/Website.md"),
        "Launch checklist\n\nDNS\n\nTTL 300\n\nRetro\n\n"
    );
    assert_eq!(
        read(out.path(), "2024_01_15.md"),
        "Met with [[Sam]]\n\ndiscussed #roadmap\n\n"
    );
    assert_eq!(read(out.path(), "Stray.md"), "first real block\nsecond line\n\n");
}

#[test]
fn outline_fixture_model() {
    let page = parse_page_file(&fixtures_dir().join("Outline.md")).unwrap();

    assert_eq!(page.title(), "Outline.md");
    assert_eq!(page.properties().len(), 1);
    let levels: Vec<_> = page.blocks().iter().map(|b| b.level).collect();
    assert_eq!(levels, vec![0, 0, 1, 1, 2, 0, 0]);
    assert_eq!(page.blocks()[2].properties.len(), 1);

    let rendered = render_page(&page);
    assert!(!rendered.contains("title::"));
    assert!(!rendered.contains("id::"));
    insta::assert_snapshot!(rendered, @r"
    top one

    top two

    nested one

    nested two
    continues here

    deepest with [[Link]]

    top three

    top four
    ");
}

#[test]
fn output_root_is_recreated() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("leftover.md"), "stale").unwrap();

    Converter::default()
        .run(&fixtures_dir(), out.path())
        .unwrap();

    assert!(!out.path().join("leftover.md").exists());
    assert!(out.path().join("Outline.md").exists());
}

#[test]
fn no_clean_keeps_existing_output() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("leftover.md"), "stale").unwrap();

    let converter = Converter::new(ConvertOptions {
        clean_output: false,
        ..ConvertOptions::default()
    });
    converter.run(&fixtures_dir(), out.path()).unwrap();

    assert!(out.path().join("leftover.md").exists());
}

/// Two pages in different folders share a file name, so they share a title.
fn duplicate_pages() -> TempDir {
    let pages = TempDir::new().unwrap();
    fs::create_dir(pages.path().join("journals")).unwrap();
    fs::create_dir(pages.path().join("pages")).unwrap();
    fs::write(pages.path().join("journals/Same.md"), "- from journals").unwrap();
    fs::write(pages.path().join("pages/Same.md"), "- from pages").unwrap();
    pages
}

fn run_with(policy: DuplicateTitles, pages: &Path, out: &Path) -> ConversionReport {
    Converter::new(ConvertOptions {
        clean_output: true,
        duplicate_titles: policy,
    })
    .run(pages, out)
    .unwrap()
}

#[test]
fn duplicate_titles_overwrite_keeps_last() {
    let pages = duplicate_pages();
    let out = TempDir::new().unwrap();

    let report = run_with(DuplicateTitles::Overwrite, pages.path(), out.path());

    assert_eq!(report.written, 2);
    assert_eq!(read(out.path(), "Same.md"), "from pages\n\n");
}

#[test]
fn duplicate_titles_skip_keeps_first() {
    let pages = duplicate_pages();
    let out = TempDir::new().unwrap();

    let report = run_with(DuplicateTitles::Skip, pages.path(), out.path());

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(read(out.path(), "Same.md"), "from journals\n\n");
}

#[test]
fn duplicate_titles_suffix_keeps_both() {
    let pages = duplicate_pages();
    let out = TempDir::new().unwrap();

    let report = run_with(DuplicateTitles::Suffix, pages.path(), out.path());

    assert_eq!(report.written, 2);
    assert_eq!(read(out.path(), "Same.md"), "from journals\n\n");
    assert_eq!(read(out.path(), "Same (1).md"), "from pages\n\n");
}

#[test]
fn unreadable_page_is_skipped() {
    let pages = TempDir::new().unwrap();
    fs::write(pages.path().join("good.md"), "- fine").unwrap();
    fs::write(pages.path().join("binary.md"), [0xff, 0xfe, 0x00]).unwrap();
    let out = TempDir::new().unwrap();

    let report = Converter::default().run(pages.path(), out.path()).unwrap();

    assert_eq!(report.parsed, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(read(out.path(), "good.md"), "fine\n\n");
    assert!(!out.path().join("binary.md").exists());
}

#[test]
fn unsafe_title_is_not_written() {
    let pages = TempDir::new().unwrap();
    fs::write(pages.path().join("..%2Fescape.md"), "- nope").unwrap();
    fs::write(pages.path().join("ok.md"), "- yes").unwrap();
    let out_parent = TempDir::new().unwrap();
    let out = out_parent.path().join("out");

    let report = Converter::default().run(pages.path(), &out).unwrap();

    assert_eq!(report.written, 1);
    assert_eq!(report.failed, 1);
    assert!(!out_parent.path().join("escape.md").exists());
}

#[test]
fn missing_source_directory_fails_run() {
    let out = TempDir::new().unwrap();
    let result = Converter::default().run(Path::new("/no/such/pages"), out.path());
    assert!(matches!(result, Err(IoError::InvalidSourceDir(_))));
}

#[test]
fn cleaning_an_output_root_that_holds_the_pages_is_refused() {
    let root = TempDir::new().unwrap();
    let pages = root.path().join("pages");
    fs::create_dir(&pages).unwrap();
    fs::write(pages.join("keep.md"), "- keep me").unwrap();

    let result = Converter::default().run(&pages, root.path());

    assert!(matches!(result, Err(IoError::OverlappingDirs { .. })));
    assert!(pages.join("keep.md").exists());
}

#[test]
fn output_root_inside_pages_is_not_read_back() {
    let pages = TempDir::new().unwrap();
    fs::write(pages.path().join("Page.md"), "- hello\n\t- world\n").unwrap();
    let out = pages.path().join("out");

    let first = Converter::default().run(pages.path(), &out).unwrap();
    let second = Converter::default().run(pages.path(), &out).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.parsed, 1);
    assert_eq!(second.dropped_lines, 0);
    assert_eq!(read(&out, "Page.md"), "hello\n\nworld\n\n");
}

#[test]
fn empty_value_properties_do_not_reach_output() {
    let pages = TempDir::new().unwrap();
    fs::write(
        pages.path().join("Props.md"),
        "tags:: \n- block\n\t  collapsed:: \n- next\n",
    )
    .unwrap();

    let page = parse_page_file(&pages.path().join("Props.md")).unwrap();
    assert_eq!(page.properties().len(), 1);
    assert_eq!(page.blocks()[0].properties.len(), 1);
    assert_eq!(page.dropped_lines(), 0);

    let out = TempDir::new().unwrap();
    Converter::default().run(pages.path(), out.path()).unwrap();
    assert_eq!(read(out.path(), "Props.md"), "block\n\nnext\n\n");
}
