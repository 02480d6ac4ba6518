// Prompt text for the difficulty-rating exchange.
// The rubric table and key list are fixed; only the progression varies.

/// Seven-criterion rubric, each criterion scored 0-3 with verbal anchors.
pub const RUBRIC_TABLE: &str = "
|   Criterion    | Very difficult (3 points) | Difficult (2 points) | Easy (1 point) | Very Easy (0 points) |
| :------------: | :----------------------: | :------------------: | :------------: | :------------------: |
| Uncommonness of chord | A lot of uncommon chords  |  Some uncommon chords  | Few uncommon chords | No uncommon chords |
| Chord finger positioning | Very cramped or very wide fingerspread | Uncomfortable or spread out fingers | Slightly uncomfortable or spread out fingers | Comfortable hand and finger position |
| Chord fingering difficulty | Mostly chords that require four fingers or barre chords | Some chords require four fingers to be played or are barre chords (not A or E) | Most chords require three fingers or are A or E barre chords | Most chords can be played with two or three fingers |
| Repetitiveness | No repeated chord progressions | A few repeated chord progressions | Quite a bit of repetition of chord progressions | A lot of repetition of chord progressions |
| Right-hand complexity | For some chords multiple inner strings are not strummed | For some chords one inner string is not strummed | For some of the chords one or more outer strings are not strummed | For the chords all strings are strummed |
| Chord progression time | Very quick chord transitions | Quick chord transitions | Slow chord transitions | Very slow chord transitions |
| Beat difficulty (syncopes/ghostnotes) | A lot of syncopes or ghostnotes | Some syncopes or ghostnotes | A few syncopes or ghostnotes | No syncopes or ghostnotes |
    ";

/// System instruction for the second turn: collect the scores from the
/// analysis text as a JSON object with the seven fixed keys.
pub const SUMMARY_SYSTEM: &str = "
    Collect the scores in the provided text as JSON and use the following keys:
            cfp: Chord finger positioning,
                    cfd: Chord finger difficulty,
                    uc: Uncommonness of chord,
                    rhc: Right-hand complexity,
                    cpt: Chord progression time,
                    bd: Beat difficulty,
                    r: Repetitiveness,
            The scores should be between 0 and 3.
            ";

/// Build the turn-1 analysis prompt around a chord progression string.
pub fn analysis_prompt(chords: &str) -> String {
    let mut prompt = String::from(
        "Your task is to rate the difficulty of the following chord progression \
         on a scale from 0 to 3. The difficulty of the chord progression is \
         determined by the following criteria:\n\n",
    );
    prompt.push_str(RUBRIC_TABLE);
    prompt.push_str("\n\n");
    prompt.push_str("The chord progression is:\n\n");
    prompt.push_str(chords);
    prompt.push_str(
        "\n\nFirst analyze the chord progression and explain your steps in the \
         following. Then, rate each criterion on a scale from 0 to 3 and explain \
         your rating.",
    );
    prompt
}
