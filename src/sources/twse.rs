//! Catalogue of well-known TWSE listings.

use crate::types::StockInfo;

/// (code, name, industry)
const LISTINGS: &[(&str, &str, &str)] = &[
    ("1101", "台泥", "水泥工業"),
    ("1216", "統一", "食品工業"),
    ("1301", "台塑", "塑膠工業"),
    ("1303", "南亞", "塑膠工業"),
    ("2002", "中鋼", "鋼鐵工業"),
    ("2207", "和泰車", "汽車工業"),
    ("2303", "聯電", "半導體業"),
    ("2308", "台達電", "電子零組件業"),
    ("2317", "鴻海", "其他電子業"),
    ("2330", "台積電", "半導體業"),
    ("2357", "華碩", "電腦及週邊設備業"),
    ("2382", "廣達", "電腦及週邊設備業"),
    ("2412", "中華電", "通信網路業"),
    ("2454", "聯發科", "半導體業"),
    ("2603", "長榮", "航運業"),
    ("2609", "陽明", "航運業"),
    ("2881", "富邦金", "金融保險業"),
    ("2882", "國泰金", "金融保險業"),
    ("2891", "中信金", "金融保險業"),
    ("3008", "大立光", "光電業"),
    ("3711", "日月光投控", "半導體業"),
    ("6505", "台塑化", "油電燃氣業"),
];

fn to_info(&(code, name, industry): &(&str, &str, &str)) -> StockInfo {
    StockInfo {
        code: code.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
    }
}

/// Common stocks on the exchange carry exactly four ASCII digits.
pub fn is_valid_stock_code(code: &str) -> bool {
    code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())
}

pub fn all() -> Vec<StockInfo> {
    LISTINGS.iter().map(to_info).collect()
}

pub fn lookup(code: &str) -> Option<StockInfo> {
    let code = code.trim();
    LISTINGS.iter().find(|(c, _, _)| *c == code).map(to_info)
}

/// Distinct industries, in catalogue order of first appearance.
pub fn industries() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for (_, _, industry) in LISTINGS {
        if !seen.contains(industry) {
            seen.push(*industry);
        }
    }
    seen
}

/// Listings matching `industry` exactly and containing `query` in their code
/// or name. Blank filters match everything.
pub fn search(industry: Option<&str>, query: Option<&str>) -> Vec<StockInfo> {
    let industry = industry.map(str::trim).filter(|s| !s.is_empty());
    let query = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    LISTINGS
        .iter()
        .filter(|(_, _, ind)| industry.map_or(true, |wanted| *ind == wanted))
        .filter(|(code, name, _)| {
            query.as_deref().map_or(true, |q| {
                code.contains(q) || name.to_lowercase().contains(q)
            })
        })
        .map(to_info)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_stock_codes() {
        assert!(is_valid_stock_code("2330"));
        assert!(is_valid_stock_code("0050"));
        assert!(!is_valid_stock_code("233"));
        assert!(!is_valid_stock_code("23300"));
        assert!(!is_valid_stock_code("2330.TW"));
        assert!(!is_valid_stock_code("２３３０"));
    }

    #[test]
    fn test_catalogue_codes_are_valid_and_unique() {
        let stocks = all();
        assert!(stocks.iter().all(|s| is_valid_stock_code(&s.code)));
        let mut codes: Vec<_> = stocks.iter().map(|s| s.code.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), stocks.len());
    }

    #[test]
    fn test_lookup() {
        let tsmc = lookup("2330").unwrap();
        assert_eq!(tsmc.name, "台積電");
        assert_eq!(tsmc.label(), "2330 - 台積電");
        assert!(lookup("9999").is_none());
    }

    #[test]
    fn test_search_by_industry() {
        let semis = search(Some("半導體業"), None);
        assert!(semis.len() >= 3);
        assert!(semis.iter().all(|s| s.industry == "半導體業"));
    }

    #[test]
    fn test_search_by_query() {
        let hits = search(None, Some("聯"));
        let codes: Vec<_> = hits.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["2303", "2454"]);

        let by_code = search(Some(""), Some("233"));
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "2330");
    }

    #[test]
    fn test_search_without_filters_returns_all() {
        assert_eq!(search(None, Some("  ")).len(), all().len());
    }

    #[test]
    fn test_industries_are_distinct() {
        let list = industries();
        assert_eq!(list[0], "水泥工業");
        let mut sorted = list.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), list.len());
    }
}
