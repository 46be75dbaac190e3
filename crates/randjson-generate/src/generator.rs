use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use randjson_core::{GenerateConfig, KEY_FIRST_CHARS, KEY_REST_CHARS, Node, NodeKind};

use crate::errors::GenerationError;
use crate::progress::{CancelToken, NoProgress, ProgressEvent, ProgressObserver};

/// Builds random document trees with an exact number of values.
///
/// Every draw comes from the instance's random source in a fixed order
/// (kind, value, target, key), so a given seed and config always produce the
/// same tree.
#[derive(Debug, Clone)]
pub struct Generator<R = ChaCha8Rng> {
    config: GenerateConfig,
    alphabet: Vec<char>,
    rng: R,
}

impl Generator<ChaCha8Rng> {
    /// Create a generator seeded from `config.seed`.
    pub fn new(config: GenerateConfig) -> Result<Self, GenerationError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Generator<R> {
    /// Create a generator drawing from a caller-supplied random source.
    pub fn with_rng(config: GenerateConfig, rng: R) -> Result<Self, GenerationError> {
        config.validate()?;
        let alphabet = config.string_alphabet.chars().collect();
        Ok(Self {
            config,
            alphabet,
            rng,
        })
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Generate one document and return its root object.
    pub fn generate<O>(
        &mut self,
        observer: &mut O,
        cancel: &CancelToken,
    ) -> Result<Node, GenerationError>
    where
        O: ProgressObserver + ?Sized,
    {
        let total = self.config.data_count;
        let mut registry = vec![PendingContainer::new(NodeKind::Object)];

        for done in 1..=total {
            cancel.check()?;

            let kind = NodeKind::ALL[self.rng.random_range(0..NodeKind::ALL.len())];
            let slot = match kind {
                NodeKind::Array | NodeKind::Object => Slot::Container(registry.len()),
                _ => Slot::Value(self.random_scalar(kind)),
            };

            // The target is drawn before a new container joins the registry,
            // so a container is never its own parent.
            let target = self.rng.random_range(0..registry.len());
            if let Slot::Container(_) = slot {
                registry.push(PendingContainer::new(kind));
            }

            let key = match registry[target].kind {
                NodeKind::Object => loop {
                    let key = self.random_identifier();
                    if registry[target].keys.insert(key.clone()) {
                        break Some(key);
                    }
                },
                _ => None,
            };
            registry[target].entries.push(Entry { key, slot });

            observer.notify(ProgressEvent::Generated { done, total });
        }

        debug!(values = total, containers = registry.len(), "tree generated");
        Ok(assemble(registry))
    }

    fn random_scalar(&mut self, kind: NodeKind) -> Node {
        match kind {
            NodeKind::String => {
                let len = self.rng.random_range(0..=self.config.max_string_length);
                let value = (0..len)
                    .map(|_| self.alphabet[self.rng.random_range(0..self.alphabet.len())])
                    .collect();
                Node::String(value)
            }
            NodeKind::Number => Node::Number(self.rng.random_range(0.0..self.config.max_number)),
            NodeKind::Boolean => Node::Boolean(self.rng.random_bool(0.5)),
            _ => Node::Null,
        }
    }

    fn random_identifier(&mut self) -> String {
        let first = KEY_FIRST_CHARS.as_bytes();
        let rest = KEY_REST_CHARS.as_bytes();

        let tail = self.rng.random_range(0..self.config.max_key_length);
        let mut key = String::with_capacity(tail + 1);
        key.push(first[self.rng.random_range(0..first.len())] as char);
        for _ in 0..tail {
            key.push(rest[self.rng.random_range(0..rest.len())] as char);
        }
        key
    }
}

/// Generate a document seeded from `config.seed`, without progress reporting.
pub fn generate(config: &GenerateConfig) -> Result<Node, GenerationError> {
    Generator::new(config.clone())?.generate(&mut NoProgress, &CancelToken::new())
}

/// A container under construction, addressed by its registry index.
#[derive(Debug)]
struct PendingContainer {
    kind: NodeKind,
    entries: Vec<Entry>,
    keys: HashSet<String>,
}

impl PendingContainer {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            keys: HashSet::new(),
        }
    }
}

#[derive(Debug)]
struct Entry {
    key: Option<String>,
    slot: Slot,
}

#[derive(Debug)]
enum Slot {
    Value(Node),
    Container(usize),
}

/// Fold the registry into an owned tree rooted at index zero.
///
/// A child container is always registered after its parent, so walking the
/// registry backwards finishes every child before its parent needs it.
fn assemble(registry: Vec<PendingContainer>) -> Node {
    let mut built: Vec<Node> = vec![Node::Null; registry.len()];

    for (index, pending) in registry.into_iter().enumerate().rev() {
        let mut take = |slot: Slot| match slot {
            Slot::Value(node) => node,
            Slot::Container(child) => std::mem::replace(&mut built[child], Node::Null),
        };

        let node = match pending.kind {
            NodeKind::Array => {
                Node::Array(pending.entries.into_iter().map(|entry| take(entry.slot)).collect())
            }
            _ => Node::Object(
                pending
                    .entries
                    .into_iter()
                    .map(|entry| (entry.key.unwrap_or_default(), take(entry.slot)))
                    .collect(),
            ),
        };
        built[index] = node;
    }

    built.into_iter().next().unwrap_or(Node::Object(Vec::new()))
}
