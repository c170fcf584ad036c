use super::*;
use crate::error::EvalError;
use crate::model::GoldRow;

fn parser() -> GoldLineParser {
    GoldLineParser::new().expect("separator regex should compile")
}

fn row(word_text: &str, root: &str, postag: &str, form: &str, ambiguity: usize) -> GoldRow {
    GoldRow {
        word_text: word_text.to_string(),
        root: root.to_string(),
        postag: postag.to_string(),
        form: form.to_string(),
        ambiguity,
    }
}

#[test]
fn analysis_cell_strips_root_suffix_and_splits_tag() {
    let cell = parse_analysis_cell("tule+a||V da||").expect("cell should parse");
    assert_eq!(cell.root, "tule");
    assert_eq!(cell.postag, "V");
    assert_eq!(cell.form, "da");

    let marked = parse_analysis_cell("toime+0||S adt||+").expect("marked cell should parse");
    assert_eq!(marked.root, "toime");
    assert_eq!(marked.postag, "S");
    assert_eq!(marked.form, "adt");
}

#[test]
fn analysis_cell_keeps_multi_word_forms_and_empty_forms() {
    let cell = parse_analysis_cell("Oslo+0||H sg n||").expect("cell should parse");
    assert_eq!(cell.form, "sg n");

    let foreign = parse_analysis_cell("difference+0||W||").expect("foreign cell should parse");
    assert_eq!(foreign.root, "difference");
    assert_eq!(foreign.postag, "W");
    assert_eq!(foreign.form, "");
}

#[test]
fn analysis_cell_without_suffix_keeps_whole_root() {
    let cell = parse_analysis_cell("ja||J ||").expect("cell should parse");
    assert_eq!(cell.root, "ja");
    assert_eq!(cell.postag, "J");
    assert_eq!(cell.form, "");
}

#[test]
fn analysis_cell_rebuilt_from_parts_reproduces_tag_field() {
    let original = "mine+nud||V nud||";
    let cell = parse_analysis_cell(original).expect("cell should parse");
    let rebuilt = format!("{}+nud||{} {}||", cell.root, cell.postag, cell.form);
    assert_eq!(rebuilt, original);
}

#[test]
fn analysis_cell_rejects_wrong_field_count() {
    let error = parse_analysis_cell("tule+a||V da").expect_err("two fields should fail");
    match error {
        EvalError::Format {
            field_count,
            content,
        } => {
            assert_eq!(field_count, 2);
            assert_eq!(content, "tule+a||V da");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(parse_analysis_cell("a||B c||d||e").is_err());
}

#[test]
fn analysis_cell_rejects_empty_tag_field() {
    let error = parse_analysis_cell("tule+a||||").expect_err("empty tag should fail");
    assert!(matches!(error, EvalError::Format { .. }));
}

#[test]
fn single_candidate_line_parses_to_gold_row() {
    let parsed = parser()
        .parse("tulla    tule+a||V da||")
        .expect("line should parse");
    assert_eq!(parsed.row, row("tulla", "tule", "V", "da", 1));
    assert_eq!(parsed.resolution, Resolution::Sole);
}

#[test]
fn marked_candidate_is_selected() {
    let parsed = parser()
        .parse("on    ole+0||V b||    ole+0||V vad||+")
        .expect("line should parse");
    assert_eq!(parsed.row, row("on", "ole", "V", "vad", 2));
    assert_eq!(parsed.resolution, Resolution::Marked);
}

#[test]
fn first_marked_candidate_wins_over_later_ones() {
    let parsed = parser()
        .parse("toime    toim+0||S adt||    toime+0||S adt||+    toime+0||S sg p||+")
        .expect("line should parse");
    assert_eq!(parsed.row, row("toime", "toime", "S", "adt", 3));
}

#[test]
fn correction_marker_overrides_listed_candidates() {
    let parsed = parser()
        .parse("Noorte    Noor+te||H pl g||    Noorte+0||H sg g|| %noor+te||S pl g||")
        .expect("line should parse");
    assert_eq!(parsed.row, row("Noorte", "noor", "S", "pl g", 2));
    assert_eq!(parsed.resolution, Resolution::Correction);
}

#[test]
fn correction_marker_wins_even_when_a_candidate_is_marked() {
    let parsed = parser()
        .parse("x    a+0||S sg n||+    b+0||S sg g||    c+0||S pl n|| %d+0||A ||")
        .expect("line should parse");
    assert_eq!(parsed.row, row("x", "d", "A", "", 3));
    assert_eq!(parsed.resolution, Resolution::Correction);
}

#[test]
fn foreign_word_correction_has_empty_form() {
    let parsed = parser()
        .parse("Difference    Difference+0||H sg n|| %difference+0||W||")
        .expect("line should parse");
    assert_eq!(parsed.row, row("Difference", "difference", "W", "", 1));
}

#[test]
fn unmarked_ambiguous_line_falls_back_to_first_candidate() {
    let parsed = parser()
        .parse("Oslo    Oslo+0||H sg g||    Oslo+0||H sg n||")
        .expect("line should parse");
    assert_eq!(parsed.row, row("Oslo", "Oslo", "H", "sg g", 2));
    assert_eq!(parsed.resolution, Resolution::Unmarked);
}

#[test]
fn trailing_noise_marker_is_ignored() {
    let parsed = parser()
        .parse("liku    liku+0||S sg n|| *")
        .expect("line should parse");
    assert_eq!(parsed.row, row("liku", "liku", "S", "sg n", 1));

    let separated = parser()
        .parse("liku    liku+0||S sg n||    *")
        .expect("separated marker should parse");
    assert_eq!(separated.row, row("liku", "liku", "S", "sg n", 1));

    let marked = parser()
        .parse("on    ole+0||V b||    ole+0||V vad||+ *")
        .expect("marked line with noise should parse");
    assert_eq!(marked.row, row("on", "ole", "V", "vad", 2));
}

#[test]
fn tabs_separate_fields() {
    let parsed = parser()
        .parse("on\tole+0||V b||\tole+0||V vad||+")
        .expect("tab-separated line should parse");
    assert_eq!(parsed.row, row("on", "ole", "V", "vad", 2));
}

#[test]
fn spaces_around_a_tab_belong_to_the_separator() {
    let parser = parser();
    for line in [
        "on \tole+0||V b||\tole+0||V vad||+",
        "on  \t ole+0||V b|| \t ole+0||V vad||+",
        "on\t  ole+0||V b||   ole+0||V vad||+",
    ] {
        let parsed = parser.parse(line).expect("mixed whitespace line should parse");
        assert_eq!(parsed.row, row("on", "ole", "V", "vad", 2), "{line:?}");
    }
}

#[test]
fn single_space_does_not_split_fields() {
    let parsed = parser()
        .parse("Noorte    Noor+te||H pl g|| %noor+te||S pl g||")
        .expect("line should parse");
    assert_eq!(parsed.row.ambiguity, 1);
}

#[test]
fn line_without_analysis_is_a_format_error() {
    let error = parser().parse("tulla").expect_err("word alone should fail");
    assert!(matches!(error, EvalError::Format { field_count: 1, .. }));
}

#[test]
fn gold_table_skips_malformed_lines_and_keeps_going() {
    let lines = [
        "tulla    tule+a||V da||",
        "katki",
        "on    ole+0||V b||    ole+0||V vad||+",
        "",
        "vale    vale+0||A",
        "Oslo    Oslo+0||H sg g||    Oslo+0||H sg n||",
    ];

    let table = build_gold_table(&parser(), "gold.txt", lines);
    assert_eq!(table.len(), 3);
    assert_eq!(table.skipped_lines, 2);
    assert_eq!(table.unmarked_fallbacks, 1);
    assert_eq!(table.text, "tulla on Oslo");
    assert_eq!(table.rows[1], row("on", "ole", "V", "vad", 2));
}

#[test]
fn read_gold_file_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let missing = dir.path().join("missing.txt");
    let error = read_gold_file(&parser(), &missing).expect_err("missing file should fail");
    assert!(matches!(error, EvalError::Io { .. }));
}

#[test]
fn read_gold_file_parses_file_contents() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("gold.txt");
    std::fs::write(
        &path,
        "tulla    tule+a||V da||\nNoorte    Noor+te||H pl g||    Noorte+0||H sg g|| %noor+te||S pl g||\n",
    )
    .expect("gold file should be written");

    let table = read_gold_file(&parser(), &path).expect("gold file should parse");
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1], row("Noorte", "noor", "S", "pl g", 2));
    assert_eq!(table.text, "tulla Noorte");
}
