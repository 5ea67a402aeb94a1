use spider_wasm::spider_query;

#[test]
fn query_drops_sentinels() {
    assert_eq!(spider_query("All", "All", "All").unwrap(), "");
    assert_eq!(spider_query("A", "1800", "All").unwrap(), "arms=A&doses=1800");
}

#[test]
fn query_form_encodes_lists() {
    assert_eq!(
        spider_query("A,B", "All", "All").unwrap(),
        "arms=A%2CB"
    );
}
