//! Fundamentals report field extraction.
//!
//! Providers return fundamentals as raw XML documents whose schema varies
//! by report type. Only market capitalization is consumed here: `MKTCAP`
//! is preferred, `MarketCap` is the fallback, and anything malformed
//! (missing elements, empty text, non-numeric values, an unparseable
//! document) yields `None` rather than an error.

use quick_xml::Reader;
use quick_xml::events::Event;

/// Extracts the market capitalization figure from a fundamentals report.
///
/// Tries the `MKTCAP` element first and falls back to `MarketCap`; the
/// first element carrying non-empty numeric text wins.
#[must_use]
pub fn extract_market_cap(xml: &str) -> Option<f64> {
    element_text(xml, "MKTCAP")
        .or_else(|| element_text(xml, "MarketCap"))
        .and_then(|text| text.parse::<f64>().ok())
}

/// Returns the trimmed text of the first `tag` element in the document,
/// or `None` if the element is missing, empty, or the document is
/// malformed.
fn element_text(xml: &str, tag: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if start.name().as_ref() == tag.as_bytes() => {
                let text = reader.read_text(start.name()).ok()?;
                let text = text.trim();
                return if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                };
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mktcap_preferred() {
        let xml = r"<ReportSnapshot>
            <Ratios><MKTCAP>2500000.5</MKTCAP></Ratios>
            <MarketCap>1.0</MarketCap>
        </ReportSnapshot>";
        assert_eq!(extract_market_cap(xml), Some(2_500_000.5));
    }

    #[test]
    fn test_market_cap_fallback() {
        let xml = r"<ReportSnapshot><Issuer><MarketCap>3500000000</MarketCap></Issuer></ReportSnapshot>";
        assert_eq!(extract_market_cap(xml), Some(3_500_000_000.0));
    }

    #[test]
    fn test_empty_mktcap_falls_back() {
        let xml = r"<Report><MKTCAP></MKTCAP><MarketCap>42</MarketCap></Report>";
        assert_eq!(extract_market_cap(xml), Some(42.0));
    }

    #[test]
    fn test_non_numeric_is_absent() {
        let xml = r"<Report><MKTCAP>n/a</MKTCAP></Report>";
        assert_eq!(extract_market_cap(xml), None);
    }

    #[test]
    fn test_missing_element_is_absent() {
        let xml = r"<Report><TotalRevenue>1</TotalRevenue></Report>";
        assert_eq!(extract_market_cap(xml), None);
    }

    #[test]
    fn test_malformed_document_is_absent() {
        assert_eq!(extract_market_cap("<Report><MKTCAP>1"), None);
        assert_eq!(extract_market_cap(""), None);
    }

    #[test]
    fn test_scientific_notation_parses() {
        let xml = r"<Report><MKTCAP>2.5e9</MKTCAP></Report>";
        assert_eq!(extract_market_cap(xml), Some(2_500_000_000.0));
    }
}
