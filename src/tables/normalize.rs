const LOOKALIKES: [(char, char); 22] = [
    ('С', 'C'),
    ('с', 'c'),
    ('О', 'O'),
    ('о', 'o'),
    ('Е', 'E'),
    ('е', 'e'),
    ('А', 'A'),
    ('а', 'a'),
    ('Р', 'P'),
    ('р', 'p'),
    ('К', 'K'),
    ('к', 'k'),
    ('Н', 'H'),
    ('н', 'h'),
    ('В', 'B'),
    ('в', 'b'),
    ('М', 'M'),
    ('м', 'm'),
    ('Т', 'T'),
    ('т', 't'),
    ('Х', 'X'),
    ('х', 'x'),
];

/// Replaces Cyrillic letters that render like Latin ones, so ids typed with either
/// alphabet resolve to the same key.
pub fn fix_lookalikes(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            LOOKALIKES
                .iter()
                .find(|(cyrillic, _)| *cyrillic == ch)
                .map(|(_, latin)| *latin)
                .unwrap_or(ch)
        })
        .collect()
}
