//! Word list shared by the engine tests. Scores are against "run".

pub const HIGH: &[&str] = &[
    "rug", "rum", "rut", "rub", "ran", "bun", "fun", "gun", "nun", "pun", "sun", "runt", "rung",
    "rune", "runs", "ruin", "rue", "ruff",
];

pub const LOW: &[&str] = &[
    "rot", "rib", "red", "rod", "row", "rim", "hut", "cut", "tin", "fan", "bug", "mud",
];

pub const ZERO: &[&str] = &[
    "cry", "for", "demo", "foul", "wait", "sell", "yeast", "wrong", "water", "skill",
];

const OUT_OF_RANGE: &[&str] = &["a", "go", "accept", "Supercalifragilisticexpialidocious"];

pub fn words() -> Vec<String> {
    let mut all: Vec<String> = ["run"]
        .iter()
        .chain(HIGH)
        .chain(LOW)
        .chain(ZERO)
        .chain(OUT_OF_RANGE)
        .map(|w| w.to_string())
        .collect();
    // upper-case duplicates must collapse into the lowercase entries
    all.push("RUG".to_string());
    all.push("Water".to_string());
    all
}
