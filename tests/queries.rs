use htmlminer::{Document, Error};

const FORUM_PAGE: &str = r#"
<html><body>
  <table id="posts">
    <tr><th>Title</th><th>Author</th><th>Replies</th></tr>
    <tr class="post"><td class="title">Hello world</td><td class="author">alice</td><td class="reply">2</td></tr>
    <tr class="post"><td class="title">Second post</td><td class="author">bob</td><td class="reply">0</td></tr>
    <tr class="post"><td class="title">Another day</td><td class="author">carol</td><td class="reply">5</td></tr>
  </table>
</body></html>
"#;

const MENU_PAGE: &str = r#"
<html><body>
  <ul id="menu">
    <li>One
      <ul class="nested"><li class="sub">Deep</li></ul>
    </li>
    <li>Two</li>
  </ul>
</body></html>
"#;

#[test]
fn grouped_extraction_skips_incomplete_rows() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);
    let rows = doc.find_all("table tr");
    assert_eq!(rows.len(), 4);

    let groups = rows.find_all_by_group(&[
        ("title", "td.title"),
        ("author", "td.author"),
        ("reply", "td.reply"),
    ]);
    // The header row has no td cells, so it forms no group.
    assert_eq!(groups.len(), 3);

    let first = groups.group(0).unwrap();
    assert_eq!(first.labels(), vec!["title", "author", "reply"]);
    assert_eq!(first.node("title").unwrap().text(), "Hello world");
    assert_eq!(first.node("author").unwrap().text(), "alice");
    assert_eq!(first.node("reply").unwrap().text(), "2");
    assert!(first.node("missing").is_none());

    let authors: Vec<String> = groups
        .iter()
        .map(|g| g.node("author").unwrap().text())
        .collect();
    assert_eq!(authors, vec!["alice", "bob", "carol"]);

    // A group viewed as a list keeps label order.
    let as_list = groups.get(2).unwrap();
    assert_eq!(as_list.len(), 3);
    assert_eq!(as_list.get(0).unwrap().text(), "Another day");
    assert_eq!(as_list.get(1).unwrap().text(), "carol");
}

#[test]
fn group_cursor_is_restartable_and_seekable() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);
    let groups = doc
        .find_all("tr.post")
        .find_all_by_group(&[("author", "td.author"), ("reply", "td.reply")]);
    assert_eq!(groups.len(), 3);

    let mut cursor = groups.iter();
    let first_pass: Vec<String> = cursor
        .by_ref()
        .map(|g| g.node("author").unwrap().text())
        .collect();
    assert_eq!(first_pass.len(), 3);

    cursor.rewind();
    let second_pass: Vec<String> = cursor
        .by_ref()
        .map(|g| g.node("author").unwrap().text())
        .collect();
    assert_eq!(first_pass, second_pass);

    cursor.seek(1).unwrap();
    assert_eq!(cursor.current().unwrap().node("author").unwrap().text(), "bob");

    let err = cursor.seek(9).unwrap_err();
    assert_eq!(err, Error::OutOfBounds { index: 9, len: 3 });
    // A failed seek leaves the cursor where it was.
    assert_eq!(cursor.position(), 1);
}

#[test]
fn duplicate_group_labels_never_complete() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);
    let rows = doc.find_all("tr.post");

    // A repeated label collapses into one keyed entry, so the group can
    // never satisfy all of its selectors.
    let groups = rows.find_all_by_group(&[("cell", "td.author"), ("cell", "td.title")]);
    assert!(groups.is_empty());
}

#[test]
fn find_first_agrees_with_find_all() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);

    let all = doc.find_all("td.author");
    let first = doc.find_first("td.author").unwrap();
    assert_eq!(first.text(), all.get(0).unwrap().text());

    assert!(doc.find_first("em").is_none());
    assert!(doc.find_all("em").is_empty());
}

#[test]
fn cursor_is_restartable_and_seekable() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);
    let rows = doc.find_all("tr.post");

    let mut cursor = rows.iter();
    let first_pass: Vec<String> = cursor.by_ref().map(|n| n.text()).collect();
    assert_eq!(first_pass.len(), 3);

    cursor.rewind();
    let second_pass: Vec<String> = cursor.by_ref().map(|n| n.text()).collect();
    assert_eq!(first_pass, second_pass);

    cursor.seek(1).unwrap();
    assert!(cursor.current().unwrap().text().contains("bob"));
}

#[test]
fn out_of_bounds_access_is_an_error() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);
    let rows = doc.find_all("tr.post");

    assert_eq!(
        rows.get(7).unwrap_err(),
        Error::OutOfBounds { index: 7, len: 3 }
    );

    let mut cursor = rows.iter();
    cursor.seek(1).unwrap();
    let err = cursor.seek(10).unwrap_err();
    assert_eq!(err, Error::OutOfBounds { index: 10, len: 3 });
    // A failed seek leaves the cursor where it was.
    assert_eq!(cursor.position(), 1);
}

#[test]
fn nodes_are_read_only() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);
    let cell = doc.find_first("td.author").unwrap();

    assert_eq!(cell.set("class", "edited"), Err(Error::ReadOnly));
    assert_eq!(cell.remove("class"), Err(Error::ReadOnly));
    // The document is unchanged.
    assert_eq!(cell.attribute("class"), Some("author"));
}

#[test]
fn keyed_access_covers_properties_and_attributes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(FORUM_PAGE);
    let cell = doc.find_first("td.title").unwrap();

    assert_eq!(cell.get("tagName").as_deref(), Some("td"));
    assert_eq!(cell.get("text").as_deref(), Some("Hello world"));
    assert_eq!(cell.get("class").as_deref(), Some("title"));
    assert_eq!(cell.get("href"), None);
}

#[test]
fn overlapping_roots_preserve_duplicates() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(MENU_PAGE);
    let lists = doc.find_all("ul");
    assert_eq!(lists.len(), 2);

    // The nested item sits under both uls, so it is reported once per root.
    let subs = lists.find_all("li.sub");
    assert_eq!(subs.len(), 2);
    assert_eq!(subs.get(0).unwrap().text(), subs.get(1).unwrap().text());
}

#[test]
fn scope_restricts_to_direct_children() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(MENU_PAGE);
    let menu = doc.find_first("ul#menu").unwrap();

    assert_eq!(menu.find_all("li").len(), 3);
    assert_eq!(menu.find_all(":scope > li").len(), 2);
}

#[test]
fn as_node_list_returns_the_same_instance() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(MENU_PAGE);
    let menu = doc.find_first("ul#menu").unwrap();

    assert!(std::ptr::eq(menu.as_node_list(), menu.as_node_list()));
    assert_eq!(menu.as_node_list().len(), 1);

    // A clone starts with its own lazy list.
    let copy = menu.clone();
    assert!(!std::ptr::eq(menu.as_node_list(), copy.as_node_list()));
}

#[test]
fn unsupported_selector_matches_nothing() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = Document::parse(MENU_PAGE);
    assert!(doc.find_all("li:hover").is_empty());
    assert!(doc.find_first("li:hover").is_none());
}

#[test]
fn selector_compilation_is_exposed() {
    let _ = env_logger::builder().is_test(true).try_init();

    assert_eq!(htmlminer::css_to_xpath("ul > li"), "descendant-or-self::ul/li");
}
