/// Keys in steno order. `Z` sits after the order used by most dictionaries.
pub const STENO_ORDER: &str = "#STKPWHRAO*EUFRPBLGTSDZ";

/// Index in `STENO_ORDER` where the right bank starts (`-F`).
const RIGHT_BANK: usize = 13;

/// Physical rows as `(column, steno index)` pairs.
pub const LAYOUT_ROWS: [&[(u16, usize)]; 3] = [
    &[
        (0, 1),
        (1, 2),
        (2, 4),
        (3, 6),
        (7, 13),
        (8, 15),
        (9, 17),
        (10, 19),
        (11, 21),
    ],
    &[
        (0, 1),
        (1, 3),
        (2, 5),
        (3, 7),
        (5, 10),
        (7, 14),
        (8, 16),
        (9, 18),
        (10, 20),
        (11, 22),
    ],
    &[(3, 8), (4, 9), (6, 11), (7, 12)],
];

pub fn key_label(index: usize) -> char {
    STENO_ORDER.chars().nth(index).unwrap_or(' ')
}

/// The layout as plain text, one row per line.
pub fn layout_text() -> String {
    LAYOUT_ROWS
        .iter()
        .map(|row| {
            let mut line = String::new();
            for &(col, index) in row.iter() {
                while line.len() < col as usize {
                    line.push(' ');
                }
                line.push(key_label(index));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number keys share positions with letters once the number bar is held.
fn digit_key(ch: char) -> Option<char> {
    Some(match ch {
        '1' => 'S',
        '2' => 'T',
        '3' => 'P',
        '4' => 'H',
        '5' => 'A',
        '0' => 'O',
        '6' => 'F',
        '7' => 'P',
        '8' => 'L',
        '9' => 'T',
        _ => return None,
    })
}

/// The set of keys pressed together for one stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StenoKeys {
    mask: u32,
}

impl StenoKeys {
    /// Parse the first stroke of a chord in RTF/CRE notation (`KAT`,
    /// `-T`, `PHAEUBG/-G`). Returns `None` for notation that does not follow
    /// steno order.
    pub fn parse(chord: &str) -> Option<Self> {
        let stroke = chord.split('/').next()?.trim();
        if stroke.is_empty() {
            return None;
        }
        let order: Vec<char> = STENO_ORDER.chars().collect();
        let mut keys = Self::default();
        let mut pos = 0;

        for ch in stroke.chars() {
            let ch = match ch {
                '-' => {
                    pos = pos.max(RIGHT_BANK);
                    continue;
                }
                c if c.is_ascii_digit() => {
                    keys.mask |= 1;
                    digit_key(c)?
                }
                c => c.to_ascii_uppercase(),
            };
            let offset = order[pos..].iter().position(|&k| k == ch)?;
            let index = pos + offset;
            keys.mask |= 1 << index;
            pos = index + 1;
        }
        Some(keys)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < 32 && self.mask & (1 << index) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn indices(&self) -> Vec<usize> {
        (0..STENO_ORDER.len()).filter(|&i| self.contains(i)).collect()
    }
}
