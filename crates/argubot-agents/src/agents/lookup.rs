//! Corpus-lookup agents: answer with a recorded counter-argument
//!
//! No generation provider is involved. The query is matched against the
//! claim corpus, one of the closest claims that has opposing children is
//! picked at random, and one of its opposing children is returned verbatim.

use crate::config::LookupConfig;
use crate::error::AgentError;
use crate::random::RandomSource;
use argubot_corpus::{ClaimFilter, NoMatchError, Retriever};
use argubot_domain::{Agent, Claim, Dialogue};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Reply of the contextual agent when nothing in the corpus matches
pub const NO_RELEVANT_RESPONSE: &str = "I'm sorry, I couldn't find a relevant response.";

/// Retrieval and random choice shared by both lookup agents
#[derive(Debug)]
struct CounterArguments {
    retriever: Arc<Retriever>,
    rng: RandomSource,
    config: LookupConfig,
}

impl CounterArguments {
    /// Text of the first claim of a random chain (always a root)
    fn opening(&self) -> String {
        let chain = self
            .rng
            .with_rng(|rng| self.retriever.random_chain(rng, None));
        let root = chain[0];
        debug!("opening with root claim {}", root.key);
        root.text.clone()
    }

    /// Closest opposed claims, skipping ones already said when configured
    fn candidates(&self, query: &str, dialogue: &Dialogue) -> Result<Vec<&Claim>, NoMatchError> {
        let n = self.config.candidates;
        if self.config.avoid_repeats {
            let fresh = self.retriever.closest_matching_where(
                query,
                n,
                ClaimFilter::HasOpposition,
                |claim| !dialogue.mentions(&claim.text),
            );
            if fresh.is_ok() {
                return fresh;
            }
            debug!("every opposed candidate was already said; allowing repeats");
        }
        self.retriever.closest_claims(query, n, true)
    }

    /// A counter-argument to the claim closest to `query`
    ///
    /// Returns the outer `Err` for broken corpus guarantees and the inner
    /// `Err` when no opposed claim matched.
    fn counter(
        &self,
        query: &str,
        dialogue: &Dialogue,
    ) -> Result<Result<String, NoMatchError>, AgentError> {
        let candidates = match self.candidates(query, dialogue) {
            Ok(candidates) => candidates,
            Err(no_match) => return Ok(Err(no_match)),
        };

        let Some(neighbor) = self.rng.choose(&candidates) else {
            return Err(AgentError::InvariantViolation(
                "retrieval returned an empty candidate list".to_string(),
            ));
        };
        info!("chose similar claim {}: {}", neighbor.key, neighbor.text);

        let cons = self.retriever.opposing_arguments(neighbor.id);
        let pool: Vec<&Claim> = if self.config.avoid_repeats {
            let unused: Vec<&Claim> = cons
                .iter()
                .copied()
                .filter(|c| !dialogue.mentions(&c.text))
                .collect();
            if unused.is_empty() {
                cons
            } else {
                unused
            }
        } else {
            cons
        };

        match self.rng.choose(&pool) {
            Some(con) => Ok(Ok(con.text.clone())),
            None => {
                let message = format!(
                    "claim {} passed the opposition filter but has no opposing children",
                    neighbor.key
                );
                error!("{}", message);
                Err(AgentError::InvariantViolation(message))
            }
        }
    }
}

/// Counters the most recent turn with a claim from the corpus
#[derive(Debug)]
pub struct KialoAgent {
    name: String,
    lookup: CounterArguments,
}

impl KialoAgent {
    /// Create a lookup agent
    ///
    /// # Errors
    ///
    /// Fails if no claim in the corpus has an opposing child, since such a
    /// corpus could never produce a counter-argument.
    pub fn new(
        name: impl Into<String>,
        retriever: Arc<Retriever>,
        rng: RandomSource,
        config: LookupConfig,
    ) -> Result<Self, AgentError> {
        let opposed = retriever.graph().opposed_count();
        if opposed == 0 {
            return Err(AgentError::Corpus(
                "no claim in the corpus has an opposing argument".to_string(),
            ));
        }
        let name = name.into();
        info!(
            "{}: lookup agent over {} claims ({} with opposition)",
            name,
            retriever.graph().len(),
            opposed
        );
        Ok(Self {
            name,
            lookup: CounterArguments {
                retriever,
                rng,
                config,
            },
        })
    }

    /// The corpus this agent answers from
    pub fn retriever(&self) -> &Retriever {
        &self.lookup.retriever
    }

    fn reply(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        let Some(last) = dialogue.last() else {
            return Ok(self.lookup.opening());
        };
        match self.lookup.counter(&last.content, dialogue)? {
            Ok(text) => Ok(text),
            Err(no_match) => {
                warn!("{}: {}", self.name, no_match);
                Err(AgentError::NoMatch(no_match))
            }
        }
    }
}

impl Agent for KialoAgent {
    type Error = AgentError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        self.reply(dialogue)
    }
}

/// Counters a window of recent turns rather than only the last one
///
/// The query is the content of the last `context_turns` turns joined by a
/// single space, oldest first.
#[derive(Debug)]
pub struct ContextualKialoAgent {
    name: String,
    lookup: CounterArguments,
}

impl ContextualKialoAgent {
    /// Create a contextual lookup agent
    pub fn new(
        name: impl Into<String>,
        retriever: Arc<Retriever>,
        rng: RandomSource,
        config: LookupConfig,
    ) -> Self {
        Self {
            name: name.into(),
            lookup: CounterArguments {
                retriever,
                rng,
                config,
            },
        }
    }

    /// The query built from the recent turns of `dialogue`
    pub fn window_query(&self, dialogue: &Dialogue) -> String {
        dialogue
            .last_n(self.lookup.config.context_turns)
            .iter()
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn reply(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        if dialogue.is_empty() {
            return Ok(self.lookup.opening());
        }
        let query = self.window_query(dialogue);
        match self.lookup.counter(&query, dialogue)? {
            Ok(text) => Ok(text),
            Err(no_match) => {
                warn!("{}: {}; using fallback reply", self.name, no_match);
                Ok(NO_RELEVANT_RESPONSE.to_string())
            }
        }
    }
}

impl Agent for ContextualKialoAgent {
    type Error = AgentError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        self.reply(dialogue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argubot_corpus::{parse_sources, RetrievalConfig};

    const CORPUS: &str = "\
1. Homework should be banned in primary schools.
1.1. Con: Homework builds discipline in young children.
1.2. Con: Parents learn what their children study through homework.
1.3. Pro: Children need time to play after school.
2. Electric cars will replace petrol cars.
";

    fn retriever(text: &str) -> Arc<Retriever> {
        Arc::new(Retriever::new(parse_sources(&[("school.txt", text)]).unwrap()))
    }

    fn akiko(seed: u64, config: LookupConfig) -> KialoAgent {
        KialoAgent::new("Akiko", retriever(CORPUS), RandomSource::seeded(seed), config).unwrap()
    }

    #[test]
    fn test_counter_is_an_opposing_child() {
        let agent = akiko(1, LookupConfig::default());
        let d = Dialogue::new().add("Human", "Homework is pointless for kids");
        let cons = [
            "Homework builds discipline in young children.",
            "Parents learn what their children study through homework.",
        ];
        for _ in 0..20 {
            let reply = agent.reply(&d).unwrap();
            assert!(cons.contains(&reply.as_str()), "unexpected reply {}", reply);
        }
    }

    #[test]
    fn test_opening_is_a_root() {
        let agent = akiko(2, LookupConfig::default());
        let reply = agent.reply(&Dialogue::new()).unwrap();
        let graph = agent.retriever().graph();
        assert!(graph
            .roots()
            .iter()
            .any(|r| graph[*r].text == reply));
    }

    #[test]
    fn test_requires_opposition() {
        let result = KialoAgent::new(
            "Akiko",
            retriever("1. Cats are great.\n1.1. Pro: They purr.\n"),
            RandomSource::seeded(0),
            LookupConfig::default(),
        );
        assert!(matches!(result, Err(AgentError::Corpus(_))));
    }

    #[test]
    fn test_avoid_repeats_prefers_unused_counter() {
        let config = LookupConfig {
            avoid_repeats: true,
            ..LookupConfig::default()
        };
        let agent = akiko(5, config);
        let d = Dialogue::new()
            .with_turn("Akiko", "Homework builds discipline in young children.")
            .with_turn("Human", "Homework should be banned in primary schools");
        for _ in 0..20 {
            assert_eq!(
                agent.reply(&d).unwrap(),
                "Parents learn what their children study through homework."
            );
        }
    }

    #[test]
    fn test_avoid_repeats_falls_back_when_all_used() {
        let config = LookupConfig {
            avoid_repeats: true,
            ..LookupConfig::default()
        };
        let agent = akiko(6, config);
        let d = Dialogue::new()
            .with_turn("Akiko", "Homework builds discipline in young children.")
            .with_turn("Akiko", "Parents learn what their children study through homework.")
            .with_turn("Human", "Ban homework");
        assert!(agent.reply(&d).is_ok());
    }

    #[test]
    fn test_no_match_reaches_the_caller() {
        let graph = parse_sources(&[("school.txt", CORPUS)]).unwrap();
        let narrow = Arc::new(Retriever::with_config(
            graph,
            RetrievalConfig {
                overfetch_factor: Some(1),
            },
        ));
        let config = LookupConfig {
            candidates: 1,
            ..LookupConfig::default()
        };
        let agent = KialoAgent::new("Akiko", narrow, RandomSource::seeded(0), config).unwrap();

        // Pool of 2: the electric-cars root and the play-after-school pro,
        // neither of which is opposed.
        let d = Dialogue::new().add("Human", "electric cars play after school");
        match agent.reply(&d) {
            Err(AgentError::NoMatch(no_match)) => {
                assert_eq!(no_match.query, "electric cars play after school");
                assert_eq!(no_match.filter, ClaimFilter::HasOpposition);
            }
            other => panic!("Expected NoMatch, got {:?}", other),
        }
    }

    #[test]
    fn test_window_query_is_chronological() {
        let agent = ContextualKialoAgent::new(
            "Akiki",
            retriever(CORPUS),
            RandomSource::seeded(0),
            LookupConfig::default(),
        );
        let d = Dialogue::new()
            .with_turn("Human", "one")
            .with_turn("Akiki", "two")
            .with_turn("Human", "three")
            .with_turn("Akiki", "four");
        assert_eq!(agent.window_query(&d), "two three four");
    }

    #[test]
    fn test_contextual_fallback() {
        let agent = ContextualKialoAgent::new(
            "Akiki",
            retriever("1. Cats are great.\n1.1. Pro: They purr.\n"),
            RandomSource::seeded(0),
            LookupConfig::default(),
        );
        let d = Dialogue::new().add("Human", "cats");
        assert_eq!(agent.reply(&d).unwrap(), NO_RELEVANT_RESPONSE);
    }
}
