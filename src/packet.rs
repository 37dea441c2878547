use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, info, trace};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Element {
    Integer(i64),
    List(Vec<Element>),
}

use Element::*;

impl Element {
    /// `n` as the only item of a list, for comparing an integer against a list.
    pub fn promote(n: i64) -> Element {
        List(vec![Integer(n)])
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer(n) => write!(f, "{}", n),
            List(items) => write!(f, "[{}]", items.iter().format(",")),
        }
    }
}

impl FromStr for Element {
    type Err = PacketError;

    fn from_str(s: &str) -> Result<Element, PacketError> {
        parse_element(s)
    }
}

/// Outcome of comparing a left packet against a right one.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Ordered,
    Unordered,
    Indeterminate,
}

impl Decision {
    pub fn ordering(self) -> Ordering {
        match self {
            Decision::Ordered => Ordering::Less,
            Decision::Unordered => Ordering::Greater,
            Decision::Indeterminate => Ordering::Equal,
        }
    }
}

#[derive(Debug)]
pub enum PacketError {
    UnbalancedBrackets { column: usize },
    Integer { column: usize, source: ParseIntError },
    UnpairedPacket { packet: usize },
    IndecisiveComparison { pair: usize },
}

impl PacketError {
    // Columns reported by a nested parse are relative to the sub-list.
    fn shifted(self, offset: usize) -> PacketError {
        match self {
            PacketError::UnbalancedBrackets { column } => PacketError::UnbalancedBrackets {
                column: column + offset,
            },
            PacketError::Integer { column, source } => PacketError::Integer {
                column: column + offset,
                source,
            },
            e => e,
        }
    }
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketError::UnbalancedBrackets { column } => {
                write!(f, "unmatched closing bracket at column {}", column)
            }
            PacketError::Integer { column, .. } => {
                write!(f, "invalid integer at column {}", column)
            }
            PacketError::UnpairedPacket { packet } => {
                write!(f, "packet {} has no partner", packet)
            }
            PacketError::IndecisiveComparison { pair } => {
                write!(f, "indecisive comparison for pair {}", pair)
            }
        }
    }
}

impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PacketError::Integer { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn integer(literal: &str, start: usize) -> Result<Element, PacketError> {
    literal
        .parse()
        .map(Integer)
        .map_err(|source| PacketError::Integer {
            column: start + 1,
            source,
        })
}

/// Parses one bracketed list, e.g. `[1,[2,3],4]`.
///
/// Only items directly inside the outermost brackets are materialized here.
/// Each nested list is found by bracket matching and handed to a recursive
/// call, so nesting depth is unbounded. Input is assumed to be well formed:
/// the only malformation reported is a closing bracket with no opener.
pub fn parse_element(line: &str) -> Result<Element, PacketError> {
    let mut starts: Vec<usize> = Vec::new();
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut literal = String::new();
    let mut literal_start = 0;

    for (i, c) in line.char_indices() {
        match c {
            '[' => {
                starts.push(i);
                depth += 1;
            }
            ']' => {
                let start = starts
                    .pop()
                    .ok_or(PacketError::UnbalancedBrackets { column: i + 1 })?;
                depth -= 1;

                if depth == 1 {
                    let nested = &line[start..=i];
                    trace!("nested list {} at column {}", nested, start + 1);
                    elements.push(parse_element(nested).map_err(|e| e.shifted(start))?);
                }
            }
            ',' => {
                if !literal.is_empty() {
                    if depth == 1 {
                        elements.push(integer(&literal, literal_start)?);
                    }
                    literal.clear();
                }
            }
            c if depth == 1 && c.is_ascii_digit() => {
                if literal.is_empty() {
                    literal_start = i;
                }
                literal.push(c);
            }
            _ => {}
        }
    }

    // No trailing comma after the last integer.
    if !literal.is_empty() {
        elements.push(integer(&literal, literal_start)?);
    }

    Ok(List(elements))
}

/// Three-way comparison of two packets.
///
/// Integers compare by value. Lists compare item by item, and the first
/// decisive item wins; if one list runs out first it is the lower one. An
/// integer compared against a list is treated as a single-item list.
pub fn compare(left: &Element, right: &Element) -> Decision {
    match (left, right) {
        (Integer(left), Integer(right)) => match left.cmp(right) {
            Ordering::Less => Decision::Ordered,
            Ordering::Greater => Decision::Unordered,
            Ordering::Equal => Decision::Indeterminate,
        },
        (List(left), List(right)) => compare_lists(left, right),
        (Integer(left), right @ List(_)) => compare(&Element::promote(*left), right),
        (left @ List(_), Integer(right)) => compare(left, &Element::promote(*right)),
    }
}

fn compare_lists(left: &[Element], right: &[Element]) -> Decision {
    for i in 0..left.len().max(right.len()) {
        let (l, r) = match (left.get(i), right.get(i)) {
            (None, _) => return Decision::Ordered,
            (_, None) => return Decision::Unordered,
            (Some(l), Some(r)) => (l, r),
        };

        match compare(l, r) {
            Decision::Indeterminate => {}
            decision => return decision,
        }
    }

    assert_eq!(
        left.len(),
        right.len(),
        "list comparison ended undecided with unequal lengths"
    );

    Decision::Indeterminate
}

/// Sum of the 1-based indices of pairs that are already in the right order.
///
/// Blank lines are skipped and the remaining lines are taken two at a time.
pub fn ordered_pair_index_sum<'a, I>(lines: I) -> Result<usize, PacketError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut pairs = lines.into_iter().filter(|l| !l.is_empty()).tuples();
    let mut sum = 0;
    let mut count = 0;

    for (i, (left, right)) in pairs.by_ref().enumerate() {
        let index = i + 1;
        count = index;

        let decision = compare(&parse_element(left)?, &parse_element(right)?);
        debug!("pair {}: {:?}", index, decision);

        match decision {
            Decision::Ordered => sum += index,
            Decision::Unordered => {}
            Decision::Indeterminate => {
                return Err(PacketError::IndecisiveComparison { pair: index })
            }
        }
    }

    if pairs.into_buffer().next().is_some() {
        return Err(PacketError::UnpairedPacket {
            packet: count * 2 + 1,
        });
    }

    info!("{} pairs, ordered index sum {}", count, sum);
    Ok(sum)
}

/// Sorts every packet together with the `[[2]]` and `[[6]]` dividers and
/// multiplies the dividers' 1-based positions.
pub fn decoder_key<'a, I>(lines: I) -> Result<usize, PacketError>
where
    I: IntoIterator<Item = &'a str>,
{
    let dividers = [
        List(vec![List(vec![Integer(2)])]),
        List(vec![List(vec![Integer(6)])]),
    ];

    let mut packets = lines
        .into_iter()
        .filter(|l| !l.is_empty())
        .map(parse_element)
        .collect::<Result<Vec<_>, _>>()?;

    packets.extend(dividers.iter().cloned());
    // Not `Ord`: `[2]` and `[[2]]` compare as equal but are different trees.
    packets.sort_by(|a, b| compare(a, b).ordering());

    let key = dividers
        .iter()
        .filter_map(|d| packets.iter().position(|p| p == d))
        .map(|i| i + 1)
        .product();

    info!("{} packets sorted, decoder key {}", packets.len(), key);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
        [1,1,3,1,1]\n\
        [1,1,5,1,1]\n\
        \n\
        [[1],[2,3,4]]\n\
        [[1],4]\n\
        \n\
        [9]\n\
        [[8,7,6]]\n\
        \n\
        [[4,4],4,4]\n\
        [[4,4],4,4,4]\n\
        \n\
        [7,7,7,7]\n\
        [7,7,7]\n\
        \n\
        []\n\
        [3]\n\
        \n\
        [[[]]]\n\
        [[]]\n\
        \n\
        [1,[2,[3,[4,[5,6,7]]]],8,9]\n\
        [1,[2,[3,[4,[5,6,0]]]],8,9]\n";

    fn decide(left: &str, right: &str) -> Decision {
        compare(&left.parse().unwrap(), &right.parse().unwrap())
    }

    #[test]
    fn test_parse_element() {
        assert_eq!(
            parse_element("[1,[2,3],4]").unwrap(),
            List(vec![
                Integer(1),
                List(vec![Integer(2), Integer(3)]),
                Integer(4)
            ])
        );

        assert_eq!(
            parse_element("[[1],[2,3,4]]").unwrap(),
            List(vec![
                List(vec![Integer(1)]),
                List(vec![Integer(2), Integer(3), Integer(4)])
            ])
        );

        assert_eq!(parse_element("[]").unwrap(), List(vec![]));
        assert_eq!(
            parse_element("[[[]]]").unwrap(),
            List(vec![List(vec![List(vec![])])])
        );
    }

    #[test]
    fn test_parse_multi_digit() {
        assert_eq!(
            parse_element("[10,[2,17],345]").unwrap(),
            List(vec![
                Integer(10),
                List(vec![Integer(2), Integer(17)]),
                Integer(345)
            ])
        );
    }

    #[test]
    fn test_parse_deep_nesting() {
        let packet = parse_element("[1,[2,[3,[4,[5,6,7]]]],8,9]").unwrap();

        let innermost = List(vec![Integer(5), Integer(6), Integer(7)]);
        let expected = List(vec![
            Integer(1),
            List(vec![
                Integer(2),
                List(vec![Integer(3), List(vec![Integer(4), innermost])]),
            ]),
            Integer(8),
            Integer(9),
        ]);

        assert_eq!(packet, expected);
    }

    #[test]
    fn test_display_is_canonical() {
        for line in EXAMPLE.lines().filter(|l| !l.is_empty()) {
            assert_eq!(parse_element(line).unwrap().to_string(), line);
        }
    }

    #[test]
    fn test_parse_errors() {
        match parse_element("[1]]") {
            Err(PacketError::UnbalancedBrackets { column }) => assert_eq!(column, 4),
            r => panic!("unexpected {:?}", r),
        }

        match parse_element("[1,[99999999999999999999]]") {
            Err(PacketError::Integer { column, .. }) => assert_eq!(column, 5),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_compare_integers() {
        for a in -3..=3 {
            for b in -3..=3 {
                let expected = match a.cmp(&b) {
                    Ordering::Less => Decision::Ordered,
                    Ordering::Greater => Decision::Unordered,
                    Ordering::Equal => Decision::Indeterminate,
                };
                assert_eq!(compare(&Integer(a), &Integer(b)), expected);
            }
        }
    }

    #[test]
    fn test_compare_identical_is_indeterminate() {
        for line in EXAMPLE.lines().filter(|l| !l.is_empty()) {
            let packet = parse_element(line).unwrap();
            assert_eq!(compare(&packet, &packet.clone()), Decision::Indeterminate);
        }
    }

    #[test]
    fn test_compare_promotes_integers() {
        let lists = ["[]", "[3]", "[[3]]", "[3,1]", "[2,9]", "[[]]", "[4]"];

        for n in 0..6 {
            for list in lists {
                let xs = parse_element(list).unwrap();
                assert_eq!(
                    compare(&Integer(n), &xs),
                    compare(&Element::promote(n), &xs)
                );
                assert_eq!(
                    compare(&xs, &Integer(n)),
                    compare(&xs, &Element::promote(n))
                );
            }
        }
    }

    #[test]
    fn test_compare_example_pairs() {
        use Decision::*;

        let expected = [
            Ordered, Ordered, Unordered, Ordered, Unordered, Ordered, Unordered, Unordered,
        ];

        let decisions = EXAMPLE
            .lines()
            .filter(|l| !l.is_empty())
            .tuples()
            .map(|(l, r)| decide(l, r))
            .collect::<Vec<_>>();

        assert_eq!(decisions, expected);
    }

    #[test]
    fn test_ordered_pair_index_sum() {
        assert_eq!(ordered_pair_index_sum(EXAMPLE.lines()).unwrap(), 13);
    }

    #[test]
    fn test_indecisive_pair() {
        let input = "[1,[2]]\n[1,2]\n";

        match ordered_pair_index_sum(input.lines()) {
            Err(PacketError::IndecisiveComparison { pair }) => assert_eq!(pair, 1),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_unpaired_packet() {
        let input = "[1]\n[2]\n\n[3]\n";

        match ordered_pair_index_sum(input.lines()) {
            Err(PacketError::UnpairedPacket { packet }) => assert_eq!(packet, 3),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_decoder_key() {
        assert_eq!(decoder_key(EXAMPLE.lines()).unwrap(), 140);
    }

    #[test]
    fn test_decoder_key_with_equivalent_packets() {
        // Both packets compare equal to `[[2]]` without being `[[2]]`.
        let input = "[2]\n[[[2]]]\n";

        assert_eq!(
            compare(&parse_element("[2]").unwrap(), &parse_element("[[2]]").unwrap()),
            Decision::Indeterminate
        );
        assert_eq!(decoder_key(input.lines()).unwrap(), 3 * 4);
    }
}
