//! Link parsing: item ids from product URLs, search terms from search URLs,
//! and item ids from search results.

use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Path markers that precede an item id in a product URL.
const ITEM_ID_MARKERS: [&str; 2] = ["item/", "/_i/"];

/// Query parameters that carry the search term on marketplace search pages.
const SEARCH_PARAMS: [&str; 2] = ["SearchText=", "keywords="];

/// Extracts the item id from a product link.
///
/// The id is the text after `item/` (or `/_i/`) up to the next `.`, e.g.
/// `https://www.aliexpress.com/item/1005006123456.html` yields
/// `1005006123456`. A bare all-digit input is accepted as an id.
#[must_use]
pub fn item_id_from_url(link: &str) -> Option<String> {
    let link = link.trim();
    if !link.is_empty() && link.bytes().all(|b| b.is_ascii_digit()) {
        return Some(link.to_owned());
    }

    ITEM_ID_MARKERS.iter().find_map(|marker| {
        let (_, rest) = link.split_once(marker)?;
        let id = rest
            .split(['.', '?', '#', '/'])
            .next()
            .unwrap_or_default()
            .trim();
        (!id.is_empty()).then(|| id.to_owned())
    })
}

/// Turns user input into a search term.
///
/// Marketplace URLs are mined for the term (`SearchText=` / `keywords=`
/// params, then `wholesale-<slug>` or `/search/<term>` path segments),
/// percent-decoded, with `-` and `+` read as spaces. Plain text passes
/// through trimmed. Returns `None` when nothing usable remains.
#[must_use]
pub fn search_query_from_input(input: &str) -> Option<String> {
    let input = input.trim();
    if !looks_like_url(input) {
        return (!input.is_empty()).then(|| input.to_owned());
    }

    let raw = query_param(input)
        .or_else(|| path_segment(input, "wholesale-", &["."]))
        .or_else(|| path_segment(input, "/search/", &[".html", "?", "#"]))
        .unwrap_or(input);

    let decoded = percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .replace('-', " ");
    let query = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    (!query.is_empty()).then_some(query)
}

/// Item ids from a search payload's `result.resultList[]`.
///
/// Each entry is tried at `productId`, `item.productId`, then `item.itemId`;
/// entries with none of them are skipped.
#[must_use]
pub fn item_ids_from_search(payload: &Value) -> Vec<String> {
    payload
        .pointer("/result/resultList")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    ["/productId", "/item/productId", "/item/itemId"]
                        .iter()
                        .find_map(|path| entry.pointer(path).and_then(id_text))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Splits a comma-separated list of links, dropping blanks.
#[must_use]
pub fn split_links(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_owned)
        .collect()
}

fn looks_like_url(input: &str) -> bool {
    input.contains("://") || input.to_ascii_lowercase().contains("aliexpress")
}

fn query_param(url: &str) -> Option<&str> {
    SEARCH_PARAMS.iter().find_map(|param| {
        let (_, rest) = url.split_once(param)?;
        rest.split(['&', '#']).next()
    })
}

fn path_segment<'a>(url: &'a str, marker: &str, terminators: &[&str]) -> Option<&'a str> {
    let (_, rest) = url.split_once(marker)?;
    let end = terminators
        .iter()
        .filter_map(|t| rest.find(t))
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

fn id_text(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_id_from_standard_link() {
        assert_eq!(
            item_id_from_url("https://www.aliexpress.com/item/1005006123456.html").as_deref(),
            Some("1005006123456")
        );
    }

    #[test]
    fn item_id_from_short_link_with_query() {
        assert_eq!(
            item_id_from_url("https://a.aliexpress.com/_i/3256804.html?spm=abc").as_deref(),
            Some("3256804")
        );
        assert_eq!(
            item_id_from_url("https://aliexpress.us/item/42?gatewayAdapt=glo2usa").as_deref(),
            Some("42")
        );
    }

    #[test]
    fn item_id_accepts_bare_digits() {
        assert_eq!(item_id_from_url(" 1005001 ").as_deref(), Some("1005001"));
    }

    #[test]
    fn item_id_none_for_unrelated_links() {
        assert_eq!(item_id_from_url("https://example.com/store/1"), None);
        assert_eq!(item_id_from_url(""), None);
        assert_eq!(item_id_from_url("https://x.com/item/.html"), None);
    }

    #[test]
    fn search_query_passes_plain_text() {
        assert_eq!(
            search_query_from_input("  wireless earbuds ").as_deref(),
            Some("wireless earbuds")
        );
        assert_eq!(search_query_from_input("   "), None);
    }

    #[test]
    fn search_query_from_search_text_param() {
        assert_eq!(
            search_query_from_input(
                "https://www.aliexpress.com/wholesale?SearchText=phone+case%20red&page=2"
            )
            .as_deref(),
            Some("phone case red")
        );
    }

    #[test]
    fn search_query_from_keywords_param() {
        assert_eq!(
            search_query_from_input("https://www.aliexpress.us/w/list.html?keywords=usb-c%20cable")
                .as_deref(),
            Some("usb c cable")
        );
    }

    #[test]
    fn search_query_from_wholesale_slug() {
        assert_eq!(
            search_query_from_input("https://www.aliexpress.com/w/wholesale-gaming-mouse.html")
                .as_deref(),
            Some("gaming mouse")
        );
    }

    #[test]
    fn search_query_from_search_path() {
        assert_eq!(
            search_query_from_input("https://aliexpress.ru/search/smart%20watch.html?x=1")
                .as_deref(),
            Some("smart watch")
        );
    }

    #[test]
    fn item_ids_from_search_tries_each_path() {
        let payload = json!({
            "result": {
                "resultList": [
                    { "productId": "111" },
                    { "item": { "productId": 222 } },
                    { "item": { "itemId": "333" } },
                    { "item": { "title": "no id" } },
                    "garbage"
                ]
            }
        });
        assert_eq!(item_ids_from_search(&payload), vec!["111", "222", "333"]);
    }

    #[test]
    fn item_ids_from_search_empty_without_result_list() {
        assert!(item_ids_from_search(&json!({ "result": {} })).is_empty());
    }

    #[test]
    fn split_links_drops_blanks() {
        assert_eq!(
            split_links(" https://a/item/1.html, ,https://a/item/2.html,"),
            vec!["https://a/item/1.html", "https://a/item/2.html"]
        );
        assert!(split_links("").is_empty());
    }
}
