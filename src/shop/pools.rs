//! Fixed sampling pools for synthesized shopkeepers and flavor text.

pub const KEEPER_NAMES: &[&str] = &[
    "Borin Ironhand",
    "Mira Thistledown",
    "Elara Moonwhisper",
    "Korgan Flintbeard",
    "Tobble Quickfingers",
    "Sarissa Vane",
    "Osric the Grey",
    "Petra Coppervein",
    "Finnick Alewright",
    "Morwenna Duskhollow",
    "Dain Emberfall",
    "Lyra Silverstring",
    "Quillon Marsh",
    "Brunhilde Oakmantle",
    "Cassian Thorne",
    "Nyx Hollowbrook",
];

pub const KEEPER_RACES: &[&str] = &[
    "Human",
    "Elf",
    "Dwarf",
    "Halfling",
    "Gnome",
    "Half-Orc",
    "Tiefling",
    "Dragonborn",
    "Goliath",
    "Firbolg",
];

pub const KEEPER_TRAITS: &[&str] = &[
    "Gruff",
    "Cheerful",
    "Shrewd",
    "Superstitious",
    "Talkative",
    "Secretive",
    "Absent-minded",
    "Boastful",
    "Patient",
    "Suspicious",
    "Generous",
    "Weary",
];

pub const KEEPER_DESCRIPTION: &str = "A seasoned veteran of the trade.";

pub const FLAVOR_TEXTS: &[&str] = &[
    "Finest goods this side of the mountains. No haggling... unless you insist.",
    "Every blade here has a story. Most of them end badly for someone else.",
    "Coin first, questions later.",
    "If you break it, you bought it. If it breaks you, no refunds.",
    "Stocked by caravans from every corner of the realm.",
    "Half of this is enchanted. The owner won't say which half.",
    "Trusted by adventurers since before the last war.",
    "Come in, browse freely, and mind the crate in the corner. It bites.",
];
