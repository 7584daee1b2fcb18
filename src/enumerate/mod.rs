//! Enumeration of candidate register numbers for one batch.

/// Program code sitting between the admission year and the branch code in
/// every register number.
pub const PROGRAM_CODE: &str = "B91A";

/// Generate the ordered suffix codes for a batch bounded by `last_number`.
///
/// Three phases, concatenated in this order:
/// 1. two-digit numeric codes "01".."99" (capped at 99 codes),
/// 2. lateral-entry letter codes "A1".."A9", "B1".., entered once the
///    numeric phase runs out, stopping as soon as `last_number + 1` codes
///    exist in total,
/// 3. plain numeric codes from 100 up to `last_number`.
///
/// Phase 3 runs even when phase 2 already reached the target count, so for
/// bounds above 99 the sequence overshoots `last_number + 1`. That matches
/// the roll-number scheme the portal actually uses, quirks included.
pub fn suffix_codes(last_number: u32) -> Vec<String> {
    let target = last_number as usize + 1;
    let mut codes = Vec::new();

    for n in 1..=last_number.min(99) {
        codes.push(format!("{n:02}"));
    }

    // Floor division keeps the letter range empty for bounds below 99.
    let max_letter_index = (i64::from(last_number) - 99).div_euclid(10);
    'letters: for letter_index in 0..=max_letter_index {
        let letter = char::from_u32('A' as u32 + letter_index as u32).expect("suffix letter");
        for digit in 1..=9 {
            if codes.len() >= target {
                break 'letters;
            }
            codes.push(format!("{letter}{digit}"));
        }
    }

    for n in 100..=last_number {
        codes.push(n.to_string());
    }

    codes
}

/// Build the full register numbers for a batch:
/// `<year><PROGRAM_CODE><branch_code><suffix>`.
pub fn student_ids(year: &str, branch_code: &str, last_number: u32) -> Vec<String> {
    suffix_codes(last_number)
        .into_iter()
        .map(|suffix| format!("{year}{PROGRAM_CODE}{branch_code}{suffix}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_bound_is_plain_numeric() {
        assert_eq!(suffix_codes(5), vec!["01", "02", "03", "04", "05"]);
    }

    #[test]
    fn zero_bound_is_empty() {
        assert!(suffix_codes(0).is_empty());
    }

    #[test]
    fn bound_99_spills_into_the_letter_phase() {
        let codes = suffix_codes(99);
        assert_eq!(codes.len(), 100);
        assert_eq!(codes[0], "01");
        assert_eq!(codes[98], "99");
        assert_eq!(codes[99], "A1");
    }

    #[test]
    fn bound_105_overshoots_with_the_numeric_continuation() {
        let codes = suffix_codes(105);

        // 99 numeric codes, then letters until the count reaches 106.
        assert_eq!(codes[0], "01");
        assert_eq!(codes[98], "99");
        assert_eq!(
            &codes[99..106],
            &["A1", "A2", "A3", "A4", "A5", "A6", "A7"]
        );

        // The continuation phase still appends 100..=105 afterwards.
        assert_eq!(&codes[106..], &["100", "101", "102", "103", "104", "105"]);
        assert_eq!(codes.len(), 112);
    }

    #[test]
    fn letter_phase_stops_mid_letter() {
        // target = 151: 99 numeric codes, then letters until the count hits
        // 151, which lands partway through 'F'.
        let codes = suffix_codes(150);
        let letters: Vec<&String> = codes
            .iter()
            .filter(|c| c.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic()))
            .collect();
        assert_eq!(letters.len(), 52); // "A1".."E9" then "F1".."F7"
        assert_eq!(letters.first().unwrap().as_str(), "A1");
        assert_eq!(letters.last().unwrap().as_str(), "F7");
        assert_eq!(codes.len(), 99 + 52 + 51); // continuation appends 100..=150
    }

    #[test]
    fn ids_carry_year_program_and_branch() {
        assert_eq!(
            student_ids("22", "05", 2),
            vec!["22B91A0501", "22B91A0502"]
        );
    }
}
