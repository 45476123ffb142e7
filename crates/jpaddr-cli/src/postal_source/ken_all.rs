use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use super::{build_with, download_and_extract, BuildStats, ParsedTable, PostalSource, PostalSourceError};
use jpaddr_core::normalize::to_zip7;
use jpaddr_core::postal::{KanjiEntry, PostalIndex};

const KEN_ALL_URL: &str = "https://www.post.japanpost.jp/zipcode/dl/kogaki/zip/ken_all.zip";

/// Japan Post KEN_ALL table (読み仮名データ, 小書き版).
///
/// File format: 15-column CSV, every text field quoted.
/// Columns: jis(0), old_zip(1), zip(2), pref_kana(3), city_kana(4),
/// town_kana(5), pref(6), city(7), town(8), flags(9..).
/// Kana columns are half-width katakana and get normalized to full-width.
pub struct KenAllSource;

impl KenAllSource {
    pub fn parse(text: &str) -> Result<ParsedTable<KanjiEntry>, PostalSourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut entries = Vec::new();
        let mut rows = 0;
        let mut skipped = 0;
        for record in reader.records() {
            let record = record?;
            rows += 1;
            let field = |i: usize| record.get(i).map(str::trim).unwrap_or("");
            let Some(zipcode) = to_zip7(field(2)) else {
                skipped += 1;
                continue;
            };
            if record.len() < 9 {
                skipped += 1;
                continue;
            }
            entries.push(KanjiEntry {
                zipcode,
                address1: field(6).to_string(),
                address2: field(7).to_string(),
                address3: field(8).to_string(),
                kana1: full_width_kana(field(3)),
                kana2: full_width_kana(field(4)),
                kana3: full_width_kana(field(5)),
            });
        }

        Ok(ParsedTable {
            index: PostalIndex::from_entries(entries),
            rows,
            skipped,
        })
    }
}

fn full_width_kana(s: &str) -> Option<String> {
    let normalized: String = s.nfkc().collect();
    (!normalized.is_empty()).then_some(normalized)
}

impl PostalSource for KenAllSource {
    fn name(&self) -> &'static str {
        "ken-all"
    }

    fn build(&self, input: &Path, output: &Path) -> Result<BuildStats, PostalSourceError> {
        build_with(input, output, Self::parse)
    }

    fn fetch(&self, dest: &Path) -> Result<PathBuf, PostalSourceError> {
        download_and_extract(KEN_ALL_URL, ".csv", dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "13113,\"150  \",\"1500041\",\"ﾄｳｷｮｳﾄ\",\"ｼﾌﾞﾔｸ\",\"ｼﾞﾝﾅﾝ\",\"東京都\",\"渋谷区\",\"神南\",0,0,1,0,0,0\n",
        "13113,\"150  \",\"1500000\",\"ﾄｳｷｮｳﾄ\",\"ｼﾌﾞﾔｸ\",\"ｲｶﾆｹｲｻｲｶﾞﾅｲﾊﾞｱｲ\",\"東京都\",\"渋谷区\",\"以下に掲載がない場合\",0,0,0,0,0,0\n",
        "01101,\"060  \",\"0600042\",\"ﾎｯｶｲﾄﾞｳ\",\"ｻｯﾎﾟﾛｼﾁｭｳｵｳｸ\",\"ｵｵﾄﾞｵﾘﾆｼ\",\"北海道\",\"札幌市中央区\",\"大通西\",1,0,1,0,0,0\n",
    );

    #[test]
    fn test_parse_rows() {
        let table = KenAllSource::parse(SAMPLE).unwrap();
        assert_eq!(table.rows, 3);
        assert_eq!(table.skipped, 0);
        assert_eq!(table.index.zip_count(), 3);

        let jinnan = &table.index.lookup("1500041")[0];
        assert_eq!(jinnan.address1, "東京都");
        assert_eq!(jinnan.address2, "渋谷区");
        assert_eq!(jinnan.address3, "神南");
        assert_eq!(jinnan.kana2.as_deref(), Some("シブヤク"));
        assert_eq!(jinnan.kana3.as_deref(), Some("ジンナン"));
    }

    #[test]
    fn test_sentinel_town_is_kept() {
        let table = KenAllSource::parse(SAMPLE).unwrap();
        assert_eq!(table.index.lookup("1500000")[0].address3, "以下に掲載がない場合");
    }

    #[test]
    fn test_quoted_comma_in_town() {
        let line = "13101,\"100  \",\"1000001\",\"ﾄｳｷｮｳﾄ\",\"ﾁﾖﾀﾞｸ\",\"ﾁﾖﾀﾞ\",\"東京都\",\"千代田区\",\"千代田（１、２）\",0,0,0,0,0,0\n\
                    13101,\"100  \",\"1000002\",\"ﾄｳｷｮｳﾄ\",\"ﾁﾖﾀﾞｸ\",\"ｺｳｷｮｶﾞｲｴﾝ\",\"東京都\",\"千代田区\",\"皇居外苑, \"\"東\"\"\",0,0,0,0,0,0\n";
        let table = KenAllSource::parse(line).unwrap();
        assert_eq!(table.index.lookup("1000002")[0].address3, "皇居外苑, \"東\"");
    }

    #[test]
    fn test_bad_rows_skipped() {
        let text = "13113,\"150  \",\"15004\",\"x\",\"x\",\"x\",\"x\",\"x\",\"x\"\n13113,\"150  \",\"1500041\"\n";
        let table = KenAllSource::parse(text).unwrap();
        assert_eq!(table.rows, 2);
        assert_eq!(table.skipped, 2);
        assert!(table.index.is_empty());
    }

    #[test]
    fn test_build_writes_index() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("KEN_ALL.CSV");
        let (sjis, _, _) = encoding_rs::SHIFT_JIS.encode(SAMPLE);
        std::fs::write(&input, &sjis).unwrap();
        let output = dir.path().join("out").join("ken_all.min.json");

        let stats = KenAllSource.build(&input, &output).unwrap();
        assert_eq!(stats.zipcodes, 3);
        assert_eq!(stats.entries, 3);

        let index = PostalIndex::<KanjiEntry>::open(&output).unwrap();
        assert_eq!(index.lookup("1500041")[0].address3, "神南");
    }
}
