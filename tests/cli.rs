use assert_cmd::Command;

use labelmap::taxonomy::io_json::read_taxonomy_json;

fn labelmap() -> Command {
    Command::cargo_bin("labelmap").unwrap()
}

#[test]
fn runs() {
    labelmap().assert().success();
}

#[test]
fn outputs_tool_name() {
    labelmap()
        .arg("-V")
        .assert()
        .success()
        .stdout(format!("labelmap {}\n", env!("CARGO_PKG_VERSION")));
}

// Categories subcommand tests

#[test]
fn categories_lists_declared_ids() {
    labelmap()
        .args(["categories", "tests/fixtures/tables.json"])
        .assert()
        .success()
        .stdout("1\ttext\n2\ttable\n3\tcell\n");
}

#[test]
fn categories_replace_promotes_sub_category_values() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--replace",
            "cell=header",
        ])
        .assert()
        .success()
        .stdout("1\ttext\n2\ttable\n3\tcolumn_header\n4\tbody\n");
}

#[test]
fn categories_filtered_renumbers_densely() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--replace",
            "cell=header",
            "--filter",
            "body,text",
            "--filtered",
        ])
        .assert()
        .success()
        .stdout("1\ttext\n2\tbody\n");
}

#[test]
fn categories_init_ignores_updates() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--replace",
            "cell=header",
            "--filter",
            "body",
            "--init",
            "--filtered",
            "--by",
            "name",
        ])
        .assert()
        .success()
        .stdout("text\t1\ntable\t2\ncell\t3\n");
}

#[test]
fn categories_json_output_uses_string_indices() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/layout.yaml",
            "--output",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"1\": \"text\""))
        .stdout(predicates::str::contains("\"4\": \"cell\""));
}

#[test]
fn categories_rejects_malformed_replacement() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--replace",
            "cell",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("CATEGORY=SUB_CATEGORY"));
}

#[test]
fn categories_rejects_unknown_replacement_category() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--replace",
            "ghost=x",
        ])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicates::str::contains("Invalid request"))
        .stderr(predicates::str::contains("'ghost'"));
}

#[test]
fn categories_rejects_unknown_replacement_sub_category() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--replace",
            "cell=missing",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("no such sub-category"));
}

#[test]
fn categories_rejects_unknown_filter_name() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--filter",
            "nope",
            "--filtered",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("cannot filter on 'nope'"));
}

#[test]
fn categories_rejects_filter_on_replaced_category() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--replace",
            "cell=header",
            "--filter",
            "cell",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("maybe has been replaced"));
}

#[test]
fn categories_json_by_name_uses_string_indices() {
    labelmap()
        .args([
            "categories",
            "tests/fixtures/tables.json",
            "--by",
            "name",
            "--output",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"text\": \"1\""))
        .stdout(predicates::str::contains("\"cell\": \"3\""));
}

#[test]
fn categories_rejects_duplicate_categories() {
    labelmap()
        .args(["categories", "tests/fixtures/invalid.json"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("listed more than once"));
}

#[test]
fn categories_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taxonomy.txt");
    std::fs::write(&path, "categories: [a]\n").unwrap();

    labelmap()
        .args(["categories", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported format"));

    labelmap()
        .args(["categories", path.to_str().unwrap(), "--format", "yaml"])
        .assert()
        .success()
        .stdout("1\ta\n");
}

// Sub-categories subcommand tests

#[test]
fn sub_categories_default_to_filtered_view() {
    labelmap()
        .args(["sub-categories", "tests/fixtures/tables.json"])
        .assert()
        .success()
        .stdout("table: item\ncell: header, row_span\n");
}

#[test]
fn sub_categories_of_promoted_value() {
    labelmap()
        .args([
            "sub-categories",
            "tests/fixtures/tables.json",
            "--replace",
            "table=item",
            "row",
        ])
        .assert()
        .success()
        .stdout("row: \n");
}

#[test]
fn sub_categories_of_replaced_category_fails() {
    labelmap()
        .args([
            "sub-categories",
            "tests/fixtures/tables.json",
            "--replace",
            "cell=header",
            "cell",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("maybe has been replaced"));
}

// Merge subcommand tests

#[test]
fn merge_unites_categories_and_intersects_sub_categories() {
    labelmap()
        .args([
            "merge",
            "tests/fixtures/tables.json",
            "tests/fixtures/layout.yaml",
        ])
        .assert()
        .success()
        .stdout(
            "Merged 2 taxonomies into 4 categories:\n  1\ttext\n  2\ttable\n  3\tcell [header]\n  4\ttitle\n",
        );
}

#[test]
fn merge_writes_taxonomy_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("merged.json");

    labelmap()
        .args([
            "merge",
            "tests/fixtures/tables.json",
            "tests/fixtures/layout.yaml",
            "--output",
            "json",
            "--write",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"categories\""));

    let merged = read_taxonomy_json(&out).unwrap();
    assert_eq!(merged.info.name, "tables+layout");
    assert_eq!(merged.categories, vec!["text", "table", "cell", "title"]);
    assert_eq!(
        merged.sub_categories["cell"]["header"],
        vec!["column_header", "body", "row_header"]
    );
    assert!(!merged.sub_categories.contains_key("table"));
}

#[test]
fn merge_requires_input() {
    labelmap().arg("merge").assert().failure();
}
