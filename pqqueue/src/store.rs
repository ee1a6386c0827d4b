//! QueueStore : registre des files, allocation d'identifiants et résolution

use crate::queue::Queue;
use crate::{Error, Result};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Alphabet des codes de partage (A-Z + 0-9, sans ambiguïté de casse)
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Longueur d'un code de partage
const CODE_LENGTH: usize = 8;

/// Nombre maximal de tirages avant d'abandonner la création
const MAX_CODE_ATTEMPTS: usize = 8;

/// Nom par défaut d'une file créée sans nom
const DEFAULT_QUEUE_NAME: &str = "Queue";

/// Longueur maximale acceptée pour un nom de file
const MAX_NAME_LENGTH: usize = 120;

/// Référence vers une file : par id, code de partage ou nom
///
/// La résolution suit l'ordre id → code → nom ; le premier champ
/// présent qui correspond à une file gagne.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueRef {
    pub id: Option<u64>,
    pub code: Option<String>,
    pub name: Option<String>,
}

impl QueueRef {
    /// Référence par identifiant numérique
    pub fn by_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Référence par code de partage
    pub fn by_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    /// Référence par nom d'affichage
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Vrai si aucun champ n'est renseigné
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.code.is_none() && self.name.is_none()
    }
}

impl fmt::Display for QueueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.id {
            write!(f, "queue_id={}", id)
        } else if let Some(code) = &self.code {
            write!(f, "code={}", code)
        } else if let Some(name) = &self.name {
            write!(f, "name={}", name)
        } else {
            write!(f, "<empty>")
        }
    }
}

/// Index interne : espace de noms id/code partagé par toutes les créations
struct StoreIndex {
    by_id: HashMap<u64, Arc<Queue>>,
    by_code: HashMap<String, u64>,
    next_id: u64,
}

/// Registre de toutes les files du processus
///
/// L'allocation id/code se fait sous un unique verrou en écriture sur
/// l'index : deux créations concurrentes ne peuvent jamais entrer en
/// collision. Le verrou n'est jamais tenu au travers d'un await.
pub struct QueueStore {
    index: RwLock<StoreIndex>,
}

impl QueueStore {
    /// Crée un registre vide
    pub fn new() -> Self {
        Self {
            index: RwLock::new(StoreIndex {
                by_id: HashMap::new(),
                by_code: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Crée une nouvelle file
    ///
    /// Le nom est normalisé (trim, défaut "Queue" si vide) et borné à
    /// 120 caractères. Le code est tiré au hasard et revérifié contre
    /// l'index ; après [`MAX_CODE_ATTEMPTS`] collisions la création
    /// échoue avec [`Error::CodeSpaceExhausted`].
    pub fn create_queue(&self, name: Option<String>) -> Result<Arc<Queue>> {
        let name = match name.as_deref().map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => {
                if trimmed.chars().count() > MAX_NAME_LENGTH {
                    return Err(Error::InvalidInput(format!(
                        "Queue name must not exceed {} characters.",
                        MAX_NAME_LENGTH
                    )));
                }
                trimmed.to_string()
            }
            _ => DEFAULT_QUEUE_NAME.to_string(),
        };

        let mut index = self.index.write().unwrap();

        let mut code = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = generate_code(CODE_LENGTH);
            if !index.by_code.contains_key(&candidate) {
                code = Some(candidate);
                break;
            }
        }
        let code = code.ok_or(Error::CodeSpaceExhausted)?;

        let id = index.next_id;
        index.next_id += 1;

        let queue = Arc::new(Queue::new(id, code.clone(), name));
        index.by_id.insert(id, queue.clone());
        index.by_code.insert(code, id);

        Ok(queue)
    }

    /// Résout une référence vers une file
    ///
    /// Ordre de résolution : id, puis code, puis nom (la plus ancienne
    /// file en cas d'homonymes). Une référence entièrement vide est une
    /// entrée invalide, pas un simple échec de résolution.
    pub fn resolve(&self, queue_ref: &QueueRef) -> Result<Arc<Queue>> {
        if queue_ref.is_empty() {
            return Err(Error::InvalidInput(
                "A queue reference (queue_id, code or queue name) is required.".to_string(),
            ));
        }

        let index = self.index.read().unwrap();

        if let Some(id) = queue_ref.id {
            if let Some(queue) = index.by_id.get(&id) {
                return Ok(queue.clone());
            }
        }

        if let Some(code) = queue_ref.code.as_deref() {
            if let Some(id) = index.by_code.get(code) {
                if let Some(queue) = index.by_id.get(id) {
                    return Ok(queue.clone());
                }
            }
        }

        if let Some(name) = queue_ref.name.as_deref() {
            // Les noms ne sont pas uniques : on prend la file la plus ancienne
            if let Some(queue) = index
                .by_id
                .values()
                .filter(|q| q.name == name)
                .min_by_key(|q| q.id)
            {
                return Ok(queue.clone());
            }
        }

        Err(Error::QueueNotFound(queue_ref.to_string()))
    }

    /// Récupère une file par id
    pub fn get(&self, id: u64) -> Option<Arc<Queue>> {
        self.index.read().unwrap().by_id.get(&id).cloned()
    }

    /// Liste toutes les files, par ordre de création
    pub fn list(&self) -> Vec<Arc<Queue>> {
        let index = self.index.read().unwrap();
        let mut queues: Vec<Arc<Queue>> = index.by_id.values().cloned().collect();
        queues.sort_by_key(|q| q.id);
        queues
    }

    /// Nombre de files enregistrées
    pub fn len(&self) -> usize {
        self.index.read().unwrap().by_id.len()
    }

    /// Vrai si aucune file n'existe
    pub fn is_empty(&self) -> bool {
        self.index.read().unwrap().by_id.is_empty()
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Tire un code de partage aléatoire (A-Z, 0-9)
fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_sequential_ids_and_valid_codes() {
        let store = QueueStore::new();

        let first = store.create_queue(None).unwrap();
        let second = store.create_queue(Some("Soirée".to_string())).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.name, "Queue");
        assert_eq!(second.name, "Soirée");
        assert_eq!(first.code.len(), CODE_LENGTH);
        assert!(first
            .code
            .bytes()
            .all(|b| CODE_ALPHABET.contains(&b)));
        assert_ne!(first.code, second.code);
    }

    #[test]
    fn test_blank_name_falls_back_to_default() {
        let store = QueueStore::new();
        let queue = store.create_queue(Some("   ".to_string())).unwrap();
        assert_eq!(queue.name, "Queue");
    }

    #[test]
    fn test_name_too_long_is_rejected() {
        let store = QueueStore::new();
        let result = store.create_queue(Some("x".repeat(121)));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_resolution_order_id_then_code_then_name() {
        let store = QueueStore::new();
        let first = store.create_queue(Some("party".to_string())).unwrap();
        let second = store.create_queue(Some("party".to_string())).unwrap();

        // Par id
        let by_id = store.resolve(&QueueRef::by_id(second.id)).unwrap();
        assert_eq!(by_id.id, second.id);

        // Par code
        let by_code = store.resolve(&QueueRef::by_code(second.code.clone())).unwrap();
        assert_eq!(by_code.id, second.id);

        // Par nom : la plus ancienne des homonymes
        let by_name = store.resolve(&QueueRef::by_name("party")).unwrap();
        assert_eq!(by_name.id, first.id);
    }

    #[test]
    fn test_resolve_unknown_is_not_found() {
        let store = QueueStore::new();
        store.create_queue(None).unwrap();

        assert!(matches!(
            store.resolve(&QueueRef::by_id(99)),
            Err(Error::QueueNotFound(_))
        ));
        assert!(matches!(
            store.resolve(&QueueRef::by_code("NOPE1234")),
            Err(Error::QueueNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_empty_ref_is_invalid_input() {
        let store = QueueStore::new();
        assert!(matches!(
            store.resolve(&QueueRef::default()),
            Err(Error::InvalidInput(_))
        ));
    }
}
