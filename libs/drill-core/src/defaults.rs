//! Built-in deck set used on first launch and whenever stored decks cannot
//! be read.

use crate::types::{Deck, DeckColor, Word};

pub const DEFAULT_DECK_ID: &str = "deck_target1900";

fn entry(
    id: i64,
    spelling: &str,
    meaning_jp: &str,
    meaning_simple: &str,
    phonetic: &str,
    katakana: &str,
) -> Word {
    Word {
        meaning_simple: Some(meaning_simple.to_string()),
        phonetic: Some(phonetic.to_string()),
        katakana: Some(katakana.to_string()),
        ..Word::new(id, spelling, meaning_jp)
    }
}

fn target_1900_words() -> Vec<Word> {
    let mut words = vec![
        Word {
            etymology: Some("de(下へ) + duce(導く) → 結論を引き出す".to_string()),
            scene: Some("🕵️‍♂️ 推理".to_string()),
            story: Some("探偵が、現場に残された足跡から犯人を推測した。".to_string()),
            example: Some("The detective deduced the truth from the footprint.".to_string()),
            example_jp: Some("探偵は足跡から真実を推測した。".to_string()),
            ..entry(
                1801,
                "deduce",
                "を推測する，演繹する",
                "証拠を使って、答えを導き出す",
                "/dɪˈduːs/",
                "ディデュース",
            )
        },
        Word {
            etymology: Some("simul(似ている) + ate(する) → マネをする".to_string()),
            scene: Some("🎮 実験・訓練".to_string()),
            story: Some("パイロットがフライトシミュレーターで飛行訓練をする。".to_string()),
            example: Some("We simulated a fire drill at school.".to_string()),
            example_jp: Some("学校で避難訓練のシミュレーション（マネ）をした。".to_string()),
            ..entry(
                1802,
                "simulate",
                "を模擬実験する；を装う；をまねる",
                "フリをする、マネをして試す",
                "/ˈsɪmjʊleɪt/",
                "シミュレイト",
            )
        },
        Word {
            etymology: Some("mergere(沈める)".to_string()),
            scene: Some("🏢 ビジネス".to_string()),
            story: Some("会社が合併した。".to_string()),
            example: Some("Two companies merged.".to_string()),
            example_jp: Some("２つの会社が合併した。".to_string()),
            ..entry(1803, "merge", "合併する", "２つが１つになる", "/mɜːrdʒ/", "マージ")
        },
    ];

    words.extend((1811..1816).map(|id| Word {
        example: Some("This is a sample.".to_string()),
        example_jp: Some("これはサンプルです。".to_string()),
        ..entry(id, &format!("sample{id}"), "サンプル", "サンプル", "/sæmpl/", "サンプル")
    }));
    words
}

/// The deck set a fresh install starts with.
pub fn initial_decks() -> Vec<Deck> {
    vec![Deck {
        id: DEFAULT_DECK_ID.to_string(),
        title: "ターゲット1900 (1801~1900)".to_string(),
        description: "大学入試・難関レベルの必須単語".to_string(),
        color: DeckColor::Indigo,
        words: target_1900_words(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdRange;

    #[test]
    fn default_deck_is_studyable() {
        let decks = initial_decks();
        assert_eq!(decks.len(), 1);
        let deck = &decks[0];
        assert_eq!(deck.words.len(), 8);
        assert!(deck
            .words
            .iter()
            .all(|w| w.id > 0 && !w.spelling.is_empty() && !w.meaning_jp.is_empty()));

        let range = IdRange::suggested_for(deck);
        assert_eq!(range, IdRange::new(1801, 1815));
        assert_eq!(range.select(deck).unwrap().len(), 8);
    }
}
