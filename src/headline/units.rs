// headline/units.rs

/// Stagger wave length: delays repeat every 14 visible characters
const DELAY_PERIOD: usize = 14;
const DELAY_STEP_MS: u32 = 45;

const DURATION_PERIOD: usize = 11;
const BASE_DURATION_MS: u32 = 2600;
const DURATION_STEP_MS: u32 = 120;

/// One animated visible character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationUnit {
    pub glyph: char,
    /// Position among visible characters only
    pub index: usize,
    /// Which word-group the unit belongs to (layout only, never timing)
    pub word: usize,
    pub start_delay_ms: u32,
    pub duration_ms: u32,
}

impl AnimationUnit {
    fn new(glyph: char, index: usize, word: usize) -> Self {
        AnimationUnit {
            glyph,
            index,
            word,
            start_delay_ms: start_delay_ms(index),
            duration_ms: duration_ms(index),
        }
    }
}

/// Headline piece in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Word(Vec<AnimationUnit>),
    /// Whitespace kept as-is between words
    Separator(char),
}

pub fn start_delay_ms(index: usize) -> u32 {
    (index % DELAY_PERIOD) as u32 * DELAY_STEP_MS
}

pub fn duration_ms(index: usize) -> u32 {
    BASE_DURATION_MS + (index % DURATION_PERIOD) as u32 * DURATION_STEP_MS
}

/// Flat list of units, one per non-whitespace character
pub fn build_units(text: &str) -> Vec<AnimationUnit> {
    let mut units = Vec::new();
    let mut word = 0;
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if in_word {
                word += 1;
                in_word = false;
            }
            continue;
        }
        in_word = true;
        units.push(AnimationUnit::new(ch, units.len(), word));
    }

    units
}

/// Split `text` into word groups of timed units and untouched whitespace
pub fn build_segments(text: &str) -> Vec<Segment> {
    let mut units = build_units(text).into_iter();
    let mut segments = Vec::new();
    let mut word: Vec<AnimationUnit> = Vec::new();

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !word.is_empty() {
                segments.push(Segment::Word(std::mem::take(&mut word)));
            }
            segments.push(Segment::Separator(ch));
        } else if let Some(unit) = units.next() {
            word.push(unit);
        }
    }

    if !word.is_empty() {
        segments.push(Segment::Word(word));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_skip_whitespace() {
        let units = build_units("hi there");

        assert_eq!(units.len(), 7);
        let glyphs: String = units.iter().map(|u| u.glyph).collect();
        assert_eq!(glyphs, "hithere");
        assert_eq!(units[2].index, 2);
        assert_eq!(units[2].glyph, 't');
    }

    #[test]
    fn test_build_is_idempotent() {
        assert_eq!(build_units("hi there"), build_units("hi there"));
        assert_eq!(build_segments("hi there"), build_segments("hi there"));
    }

    #[test]
    fn test_delay_wraps_at_fourteen() {
        let units = build_units("abcdefghijklmnopq");

        assert_eq!(units[0].start_delay_ms, 0);
        assert_eq!(units[1].start_delay_ms, 45);
        assert_eq!(units[12].start_delay_ms, 540);
        assert_eq!(units[13].start_delay_ms, 0);
        assert_eq!(units[13].duration_ms, 2840);
        assert_eq!(units[14].start_delay_ms, 45);
    }

    #[test]
    fn test_duration_cycles_every_eleven() {
        assert_eq!(duration_ms(0), 2600);
        assert_eq!(duration_ms(10), 3800);
        assert_eq!(duration_ms(11), 2600);
        assert_eq!(duration_ms(13), 2840);
    }

    #[test]
    fn test_whitespace_does_not_advance_index() {
        let units = build_units("a b   c");

        let indices: Vec<_> = units.iter().map(|u| u.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(units[2].start_delay_ms, 90);
    }

    #[test]
    fn test_segments_preserve_separators() {
        let segments = build_segments("Ти  так\n!");

        assert_eq!(segments.len(), 6);
        assert!(matches!(&segments[0], Segment::Word(u) if u.len() == 2));
        assert_eq!(segments[1], Segment::Separator(' '));
        assert_eq!(segments[2], Segment::Separator(' '));
        assert!(matches!(&segments[3], Segment::Word(u) if u.len() == 3 && u[0].index == 2));
        assert_eq!(segments[4], Segment::Separator('\n'));
        assert!(matches!(&segments[5], Segment::Word(u) if u[0].word == 2));
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(build_units("").is_empty());
        assert!(build_units("   ").is_empty());
        assert_eq!(build_segments(" ").len(), 1);
    }
}
