//! Static prefecture reference table and lookups.
//!
//! Codes follow JIS X 0401. The romanized names double as the file name
//! component, so they stay plain ASCII.

use std::collections::BTreeSet;

use crate::report::Report;

/// One prefecture in the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRecord {
    /// JIS X 0401 prefecture code.
    pub code: u32,
    /// Official local name.
    pub name_local: &'static str,
    /// ASCII romanization used in file names.
    pub name_romanized: &'static str,
}

/// All 47 prefectures in code order.
pub const PREFECTURES: [RegionRecord; 47] = [
    RegionRecord { code: 1, name_local: "北海道", name_romanized: "Hokkaido" },
    RegionRecord { code: 2, name_local: "青森県", name_romanized: "Aomori" },
    RegionRecord { code: 3, name_local: "岩手県", name_romanized: "Iwate" },
    RegionRecord { code: 4, name_local: "宮城県", name_romanized: "Miyagi" },
    RegionRecord { code: 5, name_local: "秋田県", name_romanized: "Akita" },
    RegionRecord { code: 6, name_local: "山形県", name_romanized: "Yamagata" },
    RegionRecord { code: 7, name_local: "福島県", name_romanized: "Fukushima" },
    RegionRecord { code: 8, name_local: "茨城県", name_romanized: "Ibaraki" },
    RegionRecord { code: 9, name_local: "栃木県", name_romanized: "Tochigi" },
    RegionRecord { code: 10, name_local: "群馬県", name_romanized: "Gunma" },
    RegionRecord { code: 11, name_local: "埼玉県", name_romanized: "Saitama" },
    RegionRecord { code: 12, name_local: "千葉県", name_romanized: "Chiba" },
    RegionRecord { code: 13, name_local: "東京都", name_romanized: "Tokyo" },
    RegionRecord { code: 14, name_local: "神奈川県", name_romanized: "Kanagawa" },
    RegionRecord { code: 15, name_local: "新潟県", name_romanized: "Niigata" },
    RegionRecord { code: 16, name_local: "富山県", name_romanized: "Toyama" },
    RegionRecord { code: 17, name_local: "石川県", name_romanized: "Ishikawa" },
    RegionRecord { code: 18, name_local: "福井県", name_romanized: "Fukui" },
    RegionRecord { code: 19, name_local: "山梨県", name_romanized: "Yamanashi" },
    RegionRecord { code: 20, name_local: "長野県", name_romanized: "Nagano" },
    RegionRecord { code: 21, name_local: "岐阜県", name_romanized: "Gifu" },
    RegionRecord { code: 22, name_local: "静岡県", name_romanized: "Shizuoka" },
    RegionRecord { code: 23, name_local: "愛知県", name_romanized: "Aichi" },
    RegionRecord { code: 24, name_local: "三重県", name_romanized: "Mie" },
    RegionRecord { code: 25, name_local: "滋賀県", name_romanized: "Shiga" },
    RegionRecord { code: 26, name_local: "京都府", name_romanized: "Kyoto" },
    RegionRecord { code: 27, name_local: "大阪府", name_romanized: "Osaka" },
    RegionRecord { code: 28, name_local: "兵庫県", name_romanized: "Hyogo" },
    RegionRecord { code: 29, name_local: "奈良県", name_romanized: "Nara" },
    RegionRecord { code: 30, name_local: "和歌山県", name_romanized: "Wakayama" },
    RegionRecord { code: 31, name_local: "鳥取県", name_romanized: "Tottori" },
    RegionRecord { code: 32, name_local: "島根県", name_romanized: "Shimane" },
    RegionRecord { code: 33, name_local: "岡山県", name_romanized: "Okayama" },
    RegionRecord { code: 34, name_local: "広島県", name_romanized: "Hiroshima" },
    RegionRecord { code: 35, name_local: "山口県", name_romanized: "Yamaguchi" },
    RegionRecord { code: 36, name_local: "徳島県", name_romanized: "Tokushima" },
    RegionRecord { code: 37, name_local: "香川県", name_romanized: "Kagawa" },
    RegionRecord { code: 38, name_local: "愛媛県", name_romanized: "Ehime" },
    RegionRecord { code: 39, name_local: "高知県", name_romanized: "Kochi" },
    RegionRecord { code: 40, name_local: "福岡県", name_romanized: "Fukuoka" },
    RegionRecord { code: 41, name_local: "佐賀県", name_romanized: "Saga" },
    RegionRecord { code: 42, name_local: "長崎県", name_romanized: "Nagasaki" },
    RegionRecord { code: 43, name_local: "熊本県", name_romanized: "Kumamoto" },
    RegionRecord { code: 44, name_local: "大分県", name_romanized: "Oita" },
    RegionRecord { code: 45, name_local: "宮崎県", name_romanized: "Miyazaki" },
    RegionRecord { code: 46, name_local: "鹿児島県", name_romanized: "Kagoshima" },
    RegionRecord { code: 47, name_local: "沖縄県", name_romanized: "Okinawa" },
];

/// Look up a prefecture by code.
pub fn by_code(code: u32) -> Option<&'static RegionRecord> {
    PREFECTURES.iter().find(|r| r.code == code)
}

/// Look up a prefecture by exact local name.
pub fn by_name_local(name: &str) -> Option<&'static RegionRecord> {
    PREFECTURES.iter().find(|r| r.name_local == name)
}

/// Look up a prefecture by romanized name, case-insensitive.
pub fn by_name_romanized(name: &str) -> Option<&'static RegionRecord> {
    PREFECTURES.iter().find(|r| r.name_romanized.eq_ignore_ascii_case(name))
}

/// Parse a comma-separated selection of prefecture codes or names.
///
/// Each token may be a numeric code, an exact local name, or a
/// case-insensitive romanized name. Unmatched tokens are warned about
/// and ignored, never fatal.
pub fn parse_selection(input: &str, report: &mut Report) -> BTreeSet<u32> {
    let mut codes = BTreeSet::new();

    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let record = token
            .parse::<u32>()
            .ok()
            .and_then(by_code)
            .or_else(|| by_name_local(token))
            .or_else(|| by_name_romanized(token));

        match record {
            Some(r) => {
                codes.insert(r.code);
            }
            None => report.warn(None, format!("could not find prefecture: {}", token)),
        }
    }

    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_dense_and_ordered() {
        assert_eq!(PREFECTURES.len(), 47);
        for (i, record) in PREFECTURES.iter().enumerate() {
            assert_eq!(record.code, i as u32 + 1);
        }
    }

    #[test]
    fn lookups_agree() {
        let tokyo = by_code(13).unwrap();
        assert_eq!(tokyo.name_local, "東京都");
        assert_eq!(tokyo.name_romanized, "Tokyo");

        assert_eq!(by_name_local("東京都").unwrap().code, 13);
        assert_eq!(by_name_romanized("tokyo").unwrap().code, 13);
        assert_eq!(by_name_romanized("TOKYO").unwrap().code, 13);
    }

    #[test]
    fn out_of_range_code_misses() {
        assert!(by_code(0).is_none());
        assert!(by_code(48).is_none());
    }

    #[test]
    fn selection_mixes_codes_and_names() {
        let mut report = Report::new();
        let codes = parse_selection("13,Kagoshima", &mut report);
        assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec![13, 46]);
        assert!(!report.has_warnings());
    }

    #[test]
    fn selection_warns_on_unknown_token() {
        let mut report = Report::new();
        let codes = parse_selection("13,NotARegion", &mut report);
        assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec![13]);

        let warnings: Vec<&str> = report.warnings().map(|e| e.message.as_str()).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("NotARegion"));
    }

    #[test]
    fn selection_ignores_blank_tokens() {
        let mut report = Report::new();
        let codes = parse_selection(" , 大阪府 ,, ", &mut report);
        assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec![27]);
        assert!(!report.has_warnings());
    }

    #[test]
    fn selection_rejects_out_of_range_code() {
        let mut report = Report::new();
        let codes = parse_selection("99", &mut report);
        assert!(codes.is_empty());
        assert!(report.has_warnings());
    }
}
