use rocchio::search::{FixedSearchProvider, ProviderItem, SearchClient};
use rocchio::search::google::parse_response;

fn mixed_items() -> Vec<ProviderItem> {
    let mut items = Vec::new();
    for i in 0..8 {
        let item = ProviderItem::html(
            format!("https://example.com/{i}"),
            format!("Result {i}"),
            format!("Summary {i}"),
        );
        // Every third item is a PDF.
        if i % 3 == 1 {
            items.push(item.with_file_format("PDF/Adobe Acrobat"));
        } else {
            items.push(item);
        }
    }
    items
}

#[test]
fn non_html_items_are_dropped_in_order() {
    let client = SearchClient::new(FixedSearchProvider::new(mixed_items()));

    let records = client.search("rust");
    let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/0",
            "https://example.com/2",
            "https://example.com/3",
            "https://example.com/5",
            "https://example.com/6",
        ]
    );
}

#[test]
fn five_html_and_three_pdf_give_five_records() {
    let mut items: Vec<ProviderItem> = (0..5)
        .map(|i| ProviderItem::html(format!("https://html.example/{i}"), "Page", "html page"))
        .collect();
    items.extend((0..3).map(|i| {
        ProviderItem::html(format!("https://pdf.example/{i}.pdf"), "Paper", "")
            .with_file_format("PDF/Adobe Acrobat")
    }));

    let client = SearchClient::new(FixedSearchProvider::new(items));
    let records = client.search("papers");
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.url.starts_with("https://html.example/")));
}

#[test]
fn provider_failure_yields_no_results() {
    let client = SearchClient::new(FixedSearchProvider::failing("connection refused"));
    assert!(client.search("rust").is_empty());
}

#[test]
fn google_response_file_format_is_filtered() {
    let body = r#"{
        "kind": "customsearch#search",
        "items": [
            {"link": "https://a.example", "title": "A", "snippet": "first"},
            {"link": "https://b.example/b.pdf", "title": "B", "snippet": "second",
             "fileFormat": "PDF/Adobe Acrobat"},
            {"link": "https://c.example", "title": "C"}
        ]
    }"#;

    let items = parse_response(body).unwrap();
    let client = SearchClient::new(FixedSearchProvider::new(items));
    let records = client.search("q");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].summary, "first");
    assert_eq!(records[1].url, "https://c.example");
    assert_eq!(records[1].summary, "");
}
