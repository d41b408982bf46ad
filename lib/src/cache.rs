use crate::clue_set::canonical_key;
use crate::clue_set::ClueSet;
use crate::clues::ExcludedClue;
use crate::clues::MisplacedClue;
use crate::clues::PositionalClue;
use crate::results::WordleError;
use rustc_hash::FxHashMap;
use rustc_hash::FxHasher;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::hash::Hasher;
use std::result::Result;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

const NUM_SHARDS: usize = 32;

/// Counters describing how well a [`ClueCache`] is doing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of requests answered with an existing clue set.
    pub hits: usize,
    /// Number of requests that created a new clue set.
    pub misses: usize,
    /// Number of distinct clue sets held.
    pub size: usize,
}

/// Registry of every [`ClueSet`] created so far, keyed by its canonical form.
///
/// The cache hands out at most one shared instance per distinct set of clues. Since each clue set
/// remembers the words it allows, simulating many guesses that lead to the same knowledge only
/// filters the word list once. Entries are never evicted.
///
/// The registry is split into shards, each behind its own lock, so that guesses can be evaluated
/// from several threads at once.
pub struct ClueCache {
    shards: Vec<Mutex<FxHashMap<String, Arc<ClueSet>>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ClueCache {
    /// Creates an empty cache.
    pub fn new() -> ClueCache {
        ClueCache {
            shards: (0..NUM_SHARDS)
                .map(|_| Mutex::new(FxHashMap::default()))
                .collect(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Returns the shared clue set for the given clues, creating it if this is the first time
    /// these clues have been seen.
    ///
    /// Fails if the clues contradict each other.
    pub fn make_clue_set(
        &self,
        positional: PositionalClue,
        misplaced: MisplacedClue,
        excluded: ExcludedClue,
    ) -> Result<Arc<ClueSet>, WordleError> {
        let key = canonical_key(&positional, &misplaced, &excluded);
        let mut clue_sets = self.lock_shard_for(&key);
        match clue_sets.entry(key) {
            Entry::Occupied(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                ClueSet::check_consistency(&positional, &misplaced, &excluded)?;
                self.misses.fetch_add(1, Ordering::Relaxed);
                let clue_set = Arc::new(ClueSet::new(
                    positional,
                    misplaced,
                    excluded,
                    entry.key().clone(),
                ));
                entry.insert(Arc::clone(&clue_set));
                Ok(clue_set)
            }
        }
    }

    /// Looks up a clue set by its canonical key.
    pub fn get(&self, key: &str) -> Option<Arc<ClueSet>> {
        self.lock_shard_for(key).get(key).map(Arc::clone)
    }

    /// Returns the number of distinct clue sets held.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| lock(shard).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.len(),
        }
    }

    fn lock_shard_for(&self, key: &str) -> MutexGuard<'_, FxHashMap<String, Arc<ClueSet>>> {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        lock(&self.shards[hasher.finish() as usize % self.shards.len()])
    }
}

impl Default for ClueCache {
    fn default() -> Self {
        ClueCache::new()
    }
}

// A panic while holding a shard cannot leave a half-inserted entry, so poisoning is ignored.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
