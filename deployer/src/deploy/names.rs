//! Human-readable service identifiers
//!
//! Names are an adjective and a surname joined by `_`, then normalized so that
//! every `_` becomes `-`; Cloud Run service ids do not accept underscores.

use std::sync::{LazyLock, Mutex};

use tinyrand::{RandRange, Seeded, StdRand};

/// Process-wide generator, seeded from the OS-backed UUID v4 source
static STD_RAND: LazyLock<Mutex<StdRand>> =
    LazyLock::new(|| Mutex::new(StdRand::seed(uuid::Uuid::new_v4().as_u64_pair().0)));

/// Source of raw, not yet normalized, names
pub trait NameSource: Send + Sync {
    fn raw_name(&self) -> String;
}

/// Random `adjective_surname` names
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNames;

impl NameSource for RandomNames {
    fn raw_name(&self) -> String {
        random_name()
    }
}

/// Produce a service identifier from `source`
pub fn generate_service_id(source: &dyn NameSource) -> String {
    normalize(&source.raw_name())
}

/// Replace every underscore with a hyphen
pub fn normalize(name: &str) -> String {
    name.replace('_', "-")
}

/// Pick a random `adjective_surname` pair
pub fn random_name() -> String {
    let mut rand = match STD_RAND.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    pick_name(&mut *rand)
}

/// Pick an `adjective_surname` pair using `rand`
pub fn pick_name(rand: &mut impl RandRange<usize>) -> String {
    loop {
        let left = LEFT[rand.next_range(0..LEFT.len())];
        let right = RIGHT[rand.next_range(0..RIGHT.len())];

        // Steve Wozniak is not boring
        if (left, right) != ("boring", "wozniak") {
            return format!("{}_{}", left, right);
        }
    }
}

const LEFT: &[&str] = &[
    "admiring", "adoring", "affectionate", "agitated", "amazing", "angry", "awesome", "blissful",
    "bold", "boring", "brave", "busy", "charming", "clever", "compassionate", "competent",
    "condescending", "confident", "cool", "cranky", "crazy", "dazzling", "determined", "distracted",
    "dreamy", "eager", "ecstatic", "elastic", "elated", "elegant", "eloquent", "epic", "exciting",
    "fervent", "festive", "flamboyant", "focused", "friendly", "frosty", "funny", "gallant",
    "gifted", "goofy", "gracious", "great", "happy", "hardcore", "heuristic", "hopeful", "hungry",
    "infallible", "inspiring", "intelligent", "interesting", "jolly", "jovial", "keen", "kind",
    "laughing", "loving", "lucid", "magical", "modest", "musing", "mystifying", "naughty",
    "nervous", "nice", "nifty", "nostalgic", "objective", "optimistic", "peaceful", "pedantic",
    "pensive", "practical", "priceless", "quirky", "quizzical", "recursing", "relaxed", "reverent",
    "romantic", "sad", "serene", "sharp", "silly", "sleepy", "stoic", "strange", "stupefied",
    "suspicious", "sweet", "tender", "thirsty", "trusting", "unruffled", "upbeat", "vibrant",
    "vigilant", "vigorous", "wizardly", "wonderful", "xenodochial", "youthful", "zealous", "zen",
];

const RIGHT: &[&str] = &[
    "agnesi", "albattani", "allen", "almeida", "archimedes", "ardinghelli", "aryabhata", "babbage",
    "banach", "bardeen", "bartik", "bassi", "bell", "bhabha", "bhaskara", "blackwell", "bohr",
    "booth", "borg", "bose", "brahmagupta", "brattain", "brown", "carson", "cerf", "chandrasekhar",
    "chatterjee", "clarke", "colden", "cori", "cray", "curie", "darwin", "davinci", "dijkstra",
    "dirac", "driscoll", "dubinsky", "easley", "einstein", "elion", "engelbart", "euclid", "euler",
    "fermat", "fermi", "feynman", "franklin", "galileo", "gates", "goldberg", "goldstine",
    "goldwasser", "goodall", "gould", "greider", "hamilton", "hawking", "heisenberg", "hermann",
    "hodgkin", "hoover", "hopper", "hugle", "hypatia", "jang", "jennings", "jepsen", "johnson",
    "joliot", "kalam", "kapitsa", "keller", "kepler", "khorana", "kilby", "kirch", "knuth",
    "kowalevski", "lalande", "lamarr", "lamport", "leakey", "leavitt", "lederberg", "lehmann",
    "lewin", "liskov", "lovelace", "lumiere", "mahavira", "margulis", "mayer", "mccarthy",
    "mcclintock", "meitner", "mendel", "merkle", "mirzakhani", "montalcini", "moore", "morse",
    "napier", "nash", "neumann", "newton", "nobel", "noether", "northcutt", "noyce", "panini",
    "pare", "pascal", "pasteur", "payne", "perlman", "pike", "poincare", "poitras", "ptolemy",
    "raman", "ramanujan", "ride", "ritchie", "robinson", "roentgen", "rosalind", "saha", "sammet",
    "shannon", "shaw", "shirley", "shockley", "sinoussi", "snyder", "spence", "stonebraker",
    "sutherland", "swanson", "swartz", "swirles", "tesla", "thompson", "torvalds", "turing",
    "varahamihira", "villani", "visvesvaraya", "volhard", "wescoff", "wiles", "williams",
    "wilson", "wing", "wozniak", "wright", "wu", "yalow", "yonath", "zhukovsky",
];
