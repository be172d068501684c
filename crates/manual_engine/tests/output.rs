use manual_core::{
    update, AppState, CatalogPage, Effect, Item, Msg, RawSearchRecord, RawStatsRecord, VideoId,
};
use manual_engine::{export_document, render_manual_html, save_export, ExportOptions};
use pretty_assertions::assert_eq;

fn item(id: &str, title: &str, views: u64, duration: &str) -> Item {
    Item {
        id: VideoId::new(id),
        title: title.to_string(),
        view_metric: views,
        duration_text: duration.to_string(),
        thumbnail_ref: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
    }
}

fn render(keyword: &str, rows: &[Item]) -> String {
    String::from_utf8(render_manual_html(keyword, rows, &ExportOptions::default())).unwrap()
}

#[test]
fn document_lists_rows_with_links_and_escaped_titles() {
    let rows = vec![
        item("y", "<b>Tom & Jerry</b> の \"名作\"", 500, "2:00"),
        item("x", "普通のタイトル", 100, "1:30"),
    ];
    let html = render("cats", &rows);

    let expected_row = "      <tr>\n        \
        <td><a href=\"https://www.youtube.com/watch?v=y\" target=\"_blank\" rel=\"noopener\">\
        &lt;b&gt;Tom &amp; Jerry&lt;/b&gt; の &quot;名作&quot;</a></td>\n        \
        <td>500</td>\n        \
        <td>2:00</td>\n      \
        </tr>\n";
    assert!(html.contains(expected_row), "missing row in:\n{html}");
    assert!(!html.contains("<b>"));

    let y = html.find("watch?v=y").unwrap();
    let x = html.find("watch?v=x").unwrap();
    assert!(y < x, "rows must follow the given order");
}

#[test]
fn rendering_is_byte_identical_across_calls() {
    let rows = vec![item("a", "テスト", 1, "0:01")];
    let first = render_manual_html("k", &rows, &ExportOptions::default());
    let second = render_manual_html("k", &rows, &ExportOptions::default());
    assert_eq!(first, second);
}

#[test]
fn export_contains_only_selected_rows_in_list_order() {
    let (state, _) = update(AppState::new(), Msg::KeywordChanged("cats".to_string()));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    let Some(Effect::FetchCatalog { generation, .. }) = effects.first() else {
        panic!("expected fetch effect");
    };
    let page = CatalogPage {
        search: vec![
            RawSearchRecord {
                id: "x".to_string(),
                title: "ねこ x".to_string(),
                thumbnail_ref: String::new(),
            },
            RawSearchRecord {
                id: "y".to_string(),
                title: "ねこ <y>".to_string(),
                thumbnail_ref: String::new(),
            },
        ],
        stats: vec![
            RawStatsRecord {
                view_count_text: Some("9".to_string()),
                duration_code: Some("PT9S".to_string()),
            },
            RawStatsRecord {
                view_count_text: Some("1".to_string()),
                duration_code: Some("PT1S".to_string()),
            },
        ],
    };
    let (state, _) = update(
        state,
        Msg::CatalogFetched {
            generation: *generation,
            result: Ok(page),
        },
    );
    let (state, _) = update(state, Msg::ItemToggled { id: "y".into() });
    let (_, effects) = update(state, Msg::ExportClicked);

    let [Effect::SaveExport { keyword, items }] = effects.as_slice() else {
        panic!("expected export effect, got {effects:?}");
    };
    let document = export_document(keyword, items, &ExportOptions::default());
    let html = String::from_utf8(document.bytes).unwrap();

    assert_eq!(document.filename, "cats-manual.html");
    assert!(html.contains("watch?v=y"));
    assert!(html.contains("ねこ &lt;y&gt;"));
    assert!(!html.contains("watch?v=x"));
    assert_eq!(html.matches("<tr>").count(), 2, "header row plus one item row");
}

#[test]
fn save_export_writes_document_to_output_dir() {
    let temp = tempfile::TempDir::new().unwrap();
    let out = temp.path().join("exports");
    let document = export_document("猫/犬", &[item("a", "テスト", 3, "0:03")], &ExportOptions::default());

    let path = save_export(&out, &document).unwrap();

    assert_eq!(path, out.join("猫_犬-manual.html"));
    assert_eq!(std::fs::read(&path).unwrap(), document.bytes);
}

#[test]
fn empty_selection_saves_valid_document() {
    let temp = tempfile::TempDir::new().unwrap();
    let document = export_document("cats", &[], &ExportOptions::default());

    let path = save_export(temp.path(), &document).unwrap();
    let html = std::fs::read_to_string(path).unwrap();

    assert!(html.contains("<tbody>\n    </tbody>"));
    assert!(html.contains("<h1>cats 動画マニュアル</h1>"));
}
