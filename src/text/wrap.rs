//! # Address Line Wrapping
//!
//! Splits a street address into the few vertical columns that fit on the
//! card. Lengths are counted in characters, not bytes.
//!
//! ## Greedy strategy
//!
//! ```text
//! tokens:  [東京都千代田区] [千代田1-1] [皇居マンション101号室]
//!           └── joined while ≤ soft_limit ──┘    └ > soft_limit: hard-broken
//!                                                   into hard_limit chunks
//! ```
//!
//! Lines past `max_lines` are dropped.

use crate::postcard::{WrapConfig, WrapStrategy};

/// Municipality markers the keyword strategy breaks after, in priority order.
const BREAK_KEYWORDS: [char; 3] = ['区', '市', '郡'];

/// Addresses shorter than this stay on one line under the keyword strategy.
const KEYWORD_MIN_SPLIT_LEN: usize = 16;

/// Wrap `address` according to `config.strategy`.
pub fn wrap_address(address: &str, config: &WrapConfig) -> Vec<String> {
    match config.strategy {
        WrapStrategy::Greedy => wrap_greedy(address, config),
        WrapStrategy::Keyword => wrap_keyword(address),
    }
}

/// Greedy fill of whitespace-separated tokens.
///
/// ```
/// use hagaki::postcard::WrapConfig;
/// use hagaki::text::wrap::wrap_greedy;
///
/// let lines = wrap_greedy("東京都千代田区 千代田1-1", &WrapConfig::default());
/// assert_eq!(lines, vec!["東京都千代田区 千代田1-1"]);
/// ```
pub fn wrap_greedy(address: &str, config: &WrapConfig) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for token in address.split_whitespace() {
        let token_len = token.chars().count();

        if token_len > config.soft_limit {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut chunks = hard_break(token, config.hard_limit);
            // Last chunk stays open so a following short token can join it.
            let last = chunks.pop().unwrap_or_default();
            lines.extend(chunks);
            current_len = last.chars().count();
            current = last;
            continue;
        }

        if current.is_empty() {
            current.push_str(token);
            current_len = token_len;
        } else if current_len + 1 + token_len <= config.soft_limit {
            current.push(' ');
            current.push_str(token);
            current_len += 1 + token_len;
        } else {
            lines.push(std::mem::replace(&mut current, token.to_string()));
            current_len = token_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(config.max_lines);
    lines
}

/// Split `token` into chunks of at most `width` characters.
fn hard_break(token: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Two-line split after the first municipality keyword.
///
/// A keyword only counts when it is past the 4th character and more than
/// five characters follow it; otherwise the split falls back to a fixed
/// position.
pub fn wrap_keyword(address: &str) -> Vec<String> {
    let chars: Vec<char> = address.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    if chars.len() < KEYWORD_MIN_SPLIT_LEN {
        return vec![address.to_string()];
    }

    let mut split_index = KEYWORD_MIN_SPLIT_LEN;
    for keyword in BREAK_KEYWORDS {
        if let Some(idx) = chars.iter().position(|&c| c == keyword) {
            if idx > 3 && chars.len() - idx > 5 {
                split_index = idx + 1;
                break;
            }
        }
    }

    let head: String = chars[..split_index].iter().collect();
    let tail: String = chars[split_index..].iter().collect();
    vec![head, tail]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn greedy(address: &str) -> Vec<String> {
        wrap_greedy(address, &WrapConfig::default())
    }

    #[test]
    fn test_empty_address() {
        assert!(greedy("").is_empty());
        assert!(greedy("   ").is_empty());
    }

    #[test]
    fn test_short_address_single_line() {
        assert_eq!(greedy("東京都千代田区千代田1-1"), vec!["東京都千代田区千代田1-1"]);
    }

    #[test]
    fn test_tokens_joined_with_single_space() {
        assert_eq!(greedy("港区  六本木\t6-10-1"), vec!["港区 六本木 6-10-1"]);
    }

    #[test]
    fn test_break_when_soft_limit_exceeded() {
        // 10 + 1 + 8 = 19 > 17
        let lines = greedy("北海道札幌市中央区北 一条西2-1-1");
        assert_eq!(lines, vec!["北海道札幌市中央区北", "一条西2-1-1"]);
    }

    #[test]
    fn test_join_exactly_at_soft_limit() {
        // 8 + 1 + 8 = 17
        let lines = greedy("あいうえおかきく さしすせそたちつ");
        assert_eq!(lines, vec!["あいうえおかきく さしすせそたちつ"]);
    }

    #[test]
    fn test_long_token_hard_broken() {
        let token: String = "あ".repeat(40);
        let lines = greedy(&token);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), 18);
        assert_eq!(lines[1].chars().count(), 18);
        assert_eq!(lines[2].chars().count(), 4);
    }

    #[test]
    fn test_fifty_chars_truncated_to_three() {
        let body: String = "東".repeat(50);
        let lines = greedy(&body);
        // ceil(50 / 18) = 3 chunks
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.concat().chars().count(), 50);
    }

    #[test]
    fn test_lines_reproduce_address_without_spaces() {
        fn squeeze(s: &str) -> String {
            s.chars().filter(|c| !c.is_whitespace()).collect()
        }

        for address in [
            "京都府京都市左京区 下鴨泉川町59 ビル名が非常に長い建物の三階東側",
            "北海道 札幌市中央区北一条西二丁目一番地札幌時計台ビル 八階",
            "東京都  千代田区\u{3000}千代田1-1",
        ] {
            let lines = greedy(address);
            assert!(lines.len() <= 3, "{:?}", lines);
            assert_eq!(squeeze(&lines.concat()), squeeze(address));
        }
    }

    #[test]
    fn test_overflow_dropped_past_max_lines() {
        let body: String = "東".repeat(80);
        let lines = greedy(&body);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.concat().chars().count(), 54);
    }

    #[test]
    fn test_remainder_chunk_accepts_following_token() {
        // 20 chars → [18] + "いい" as current line, then " 1-1" joins it
        let address = format!("{} 1-1", "い".repeat(20));
        let lines = greedy(&address);
        assert_eq!(lines, vec!["い".repeat(18), "いい 1-1".to_string()]);
    }

    #[test]
    fn test_pending_line_flushed_before_hard_break() {
        let address = format!("東京都 {}", "か".repeat(19));
        let lines = greedy(&address);
        assert_eq!(lines, vec!["東京都".to_string(), "か".repeat(18), "か".to_string()]);
    }

    #[test]
    fn test_lines_never_exceed_hard_limit() {
        let inputs = [
            "東京都千代田区千代田1-1 皇居マンション101号室 とても長い建物の名前がここに入ります",
            "a b c d e f g h i j k l m n o p q r s t u v w x y z",
            "一二三四五六七八九十一二三四五六七 八",
        ];
        for input in inputs {
            let lines = greedy(input);
            assert!(lines.len() <= 3, "{:?}", lines);
            for line in &lines {
                assert!(line.chars().count() <= 18, "{:?}", line);
            }
        }
    }

    #[test]
    fn test_keyword_short_address_untouched() {
        assert_eq!(wrap_keyword("東京都港区六本木"), vec!["東京都港区六本木"]);
    }

    #[test]
    fn test_keyword_split_after_ward() {
        let lines = wrap_keyword("東京都千代田区千代田一丁目一番一号");
        assert_eq!(lines, vec!["東京都千代田区", "千代田一丁目一番一号"]);
    }

    #[test]
    fn test_keyword_too_early_falls_back_to_city() {
        // 区 at index 1 is too early; 市 at index 8 qualifies
        let lines = wrap_keyword("北区神奈川県横浜市西区みなとみらい二丁目");
        assert_eq!(lines, vec!["北区神奈川県横浜市", "西区みなとみらい二丁目"]);
    }

    #[test]
    fn test_keyword_fixed_split_without_keyword() {
        let address = "あいうえおかきくけこさしすせそたちつてと";
        let lines = wrap_keyword(address);
        assert_eq!(lines, vec!["あいうえおかきくけこさしすせそた", "ちつてと"]);
    }

    #[test]
    fn test_strategy_dispatch() {
        let config = WrapConfig {
            strategy: WrapStrategy::Keyword,
            ..Default::default()
        };
        let lines = wrap_address("東京都千代田区千代田一丁目一番一号", &config);
        assert_eq!(lines.len(), 2);
    }
}
