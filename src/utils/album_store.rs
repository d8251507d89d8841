#![forbid(unsafe_code)]

use tokio::sync::RwLock;

use crate::utils::album_types::{seed_albums, Album};

// ***************************************************************************
//                                AlbumStore
// ***************************************************************************
/** The in-memory record store.  Albums are kept in insertion order and are
 * never removed or updated in place.  A single lock guards the collection so
 * that concurrent creates are never lost and readers never see a partial
 * append.  Nothing is persisted; the contents are gone when the process exits.
 */
#[derive(Debug, Default)]
pub struct AlbumStore {
    albums: RwLock<Vec<Album>>,
}

impl AlbumStore {
    /// Create an empty store.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the startup seed records.
    pub fn seeded() -> Self {
        Self::with_albums(seed_albums())
    }

    pub fn with_albums(albums: Vec<Album>) -> Self {
        Self {albums: RwLock::new(albums)}
    }

    // ---------------------------------------------------------------------------
    // list:
    // ---------------------------------------------------------------------------
    /** Return a copy of all albums in insertion order. */
    pub async fn list(&self) -> Vec<Album> {
        self.albums.read().await.clone()
    }

    // ---------------------------------------------------------------------------
    // find_by_id:
    // ---------------------------------------------------------------------------
    /** Return the first album whose id matches.  Ids are not unique, so a
     * later album with the same id is never returned.
     */
    pub async fn find_by_id(&self, id: &str) -> Option<Album> {
        self.albums.read().await.iter().find(|a| a.id == id).cloned()
    }

    // ---------------------------------------------------------------------------
    // append:
    // ---------------------------------------------------------------------------
    /** Add the album to the end of the collection without any checks and
     * return the new record count.
     */
    pub async fn append(&self, album: Album) -> usize {
        let mut albums = self.albums.write().await;
        albums.push(album);
        albums.len()
    }

    pub async fn len(&self) -> usize {
        self.albums.read().await.len()
    }
}
