//! Album dispatch tables against a real SQLite catalog

use std::sync::Arc;

use jukebox_common::db::init_database;
use jukebox_common::{Album, Artist, EntryStatus, Error};
use jukebox_portlet::clp::{
    type_tag, AlbumLocalServiceClpInvoker, AlbumServiceClpInvoker, ClpError, Value,
};
use jukebox_portlet::service::{
    AlbumFields, AlbumLocalService, AlbumLocalServiceImpl, AlbumService, AlbumServiceImpl,
    ArtistLocalService, ArtistLocalServiceImpl, ServiceContext,
};
use tempfile::TempDir;

const PRINCIPAL: i64 = 77;

struct Catalog {
    _temp_dir: TempDir,
    artists: Arc<dyn ArtistLocalService>,
    albums: Arc<dyn AlbumLocalService>,
    context: ServiceContext,
}

async fn catalog() -> Catalog {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("jukebox.db"))
        .await
        .expect("database should initialize");

    let artists: Arc<dyn ArtistLocalService> = Arc::new(ArtistLocalServiceImpl::new(pool.clone()));
    let albums: Arc<dyn AlbumLocalService> =
        Arc::new(AlbumLocalServiceImpl::new(pool, Arc::clone(&artists)));

    Catalog {
        _temp_dir: temp_dir,
        artists,
        albums,
        context: ServiceContext::new(1, 20, 5),
    }
}

impl Catalog {
    async fn artist(&self, name: &str) -> Artist {
        self.artists
            .add_artist(name.to_string(), String::new(), self.context)
            .await
            .unwrap()
    }

    async fn album(&self, artist: &Artist, name: &str, year: i32) -> Album {
        let fields = AlbumFields {
            artist_id: artist.artist_id,
            name: name.to_string(),
            year,
            cover_image: None,
        };
        self.albums
            .add_album_with_fields(self.context.user_id, fields, self.context)
            .await
            .unwrap()
    }

    fn local_invoker(&self) -> AlbumLocalServiceClpInvoker {
        AlbumLocalServiceClpInvoker::new(Arc::clone(&self.albums)).unwrap()
    }

    fn remote(&self) -> Arc<AlbumServiceImpl> {
        Arc::new(AlbumServiceImpl::new(Arc::clone(&self.albums), PRINCIPAL))
    }
}

fn list(albums: Vec<Album>) -> Value {
    Value::from(albums)
}

#[tokio::test]
async fn test_local_table_registers_every_signature() {
    let catalog = catalog().await;
    let invoker = catalog.local_invoker();
    let table = invoker.table();

    let long = type_tag::LONG;
    let int = type_tag::INT;
    let string = type_tag::STRING;
    let bytes = type_tag::BYTES;
    let album = type_tag::ALBUM;
    let context = type_tag::SERVICE_CONTEXT;

    let expected: Vec<(&str, Vec<&str>)> = vec![
        ("addAlbum", vec![album]),
        ("createAlbum", vec![long]),
        ("deleteAlbum", vec![long]),
        ("deleteAlbum", vec![album]),
        ("fetchAlbum", vec![long]),
        ("fetchAlbumByUuidAndGroupId", vec![string, long]),
        ("getAlbum", vec![long]),
        ("getAlbumsByUuidAndCompanyId", vec![string, long]),
        ("getAlbumByUuidAndGroupId", vec![string, long]),
        ("getAlbums", vec![int, int]),
        ("getAlbumsCount", vec![]),
        ("updateAlbum", vec![album]),
        ("getOSGiServiceIdentifier", vec![]),
        ("addAlbum", vec![long, long, string, int, bytes, context]),
        ("deleteAlbums", vec![long]),
        ("getAlbums", vec![long]),
        ("getAlbums", vec![long, int, int]),
        ("getAlbumsByArtistId", vec![long]),
        ("getAlbumsCount", vec![long]),
        ("moveAlbumToTrash", vec![long, long]),
        ("restoreAlbumFromTrash", vec![long, long]),
        ("updateAlbum", vec![long, long, long, string, int, bytes, context]),
    ];

    assert_eq!(table.len(), expected.len());
    for (name, types) in &expected {
        assert!(
            table.lookup(name, types).is_some(),
            "missing {}({})",
            name,
            types.join(", ")
        );
    }
}

#[tokio::test]
async fn test_local_invoke_matches_direct_calls() {
    let catalog = catalog().await;
    let miles = catalog.artist("Miles Davis").await;
    let kind_of_blue = catalog.album(&miles, "Kind of Blue", 1959).await;
    catalog.album(&miles, "Sketches of Spain", 1960).await;
    let invoker = catalog.local_invoker();
    let albums = &catalog.albums;
    let group_id = catalog.context.group_id;

    let invoked = invoker
        .invoke_method("getAlbum", &["long"], vec![Value::Long(kind_of_blue.album_id)])
        .await
        .unwrap();
    assert_eq!(invoked, Value::from(albums.get_album(kind_of_blue.album_id).await.unwrap()));

    let invoked = invoker
        .invoke_method("fetchAlbum", &["long"], vec![Value::Long(9999)])
        .await
        .unwrap();
    assert_eq!(invoked, Value::Null);

    let invoked = invoker
        .invoke_method(
            "fetchAlbumByUuidAndGroupId",
            &["string", "long"],
            vec![Value::from(kind_of_blue.uuid.as_str()), Value::Long(group_id)],
        )
        .await
        .unwrap();
    assert_eq!(invoked, Value::from(kind_of_blue.clone()));

    let invoked = invoker
        .invoke_method(
            "getAlbumsByUuidAndCompanyId",
            &["string", "long"],
            vec![Value::from(kind_of_blue.uuid.as_str()), Value::Long(1)],
        )
        .await
        .unwrap();
    assert_eq!(
        invoked,
        list(albums.get_albums_by_uuid_and_company_id(&kind_of_blue.uuid, 1).await.unwrap())
    );

    let invoked = invoker
        .invoke_method("getAlbums", &["long"], vec![Value::Long(group_id)])
        .await
        .unwrap();
    let direct = albums.get_albums(group_id).await.unwrap();
    assert_eq!(direct.len(), 2);
    assert_eq!(invoked, list(direct));

    let invoked = invoker
        .invoke_method(
            "getAlbums",
            &["long", "int", "int"],
            vec![Value::Long(group_id), Value::Int(0), Value::Int(1)],
        )
        .await
        .unwrap();
    assert_eq!(invoked, list(albums.get_albums_page(group_id, 0, 1).await.unwrap()));

    let invoked = invoker
        .invoke_method("getAlbums", &["int", "int"], vec![Value::Int(-1), Value::Int(-1)])
        .await
        .unwrap();
    assert_eq!(invoked, list(albums.get_albums_range(-1, -1).await.unwrap()));

    let invoked = invoker
        .invoke_method("getAlbumsByArtistId", &["long"], vec![Value::Long(miles.artist_id)])
        .await
        .unwrap();
    assert_eq!(invoked, list(albums.get_albums_by_artist_id(miles.artist_id).await.unwrap()));

    let invoked = invoker
        .invoke_method("getAlbumsCount", &["long"], vec![Value::Long(group_id)])
        .await
        .unwrap();
    assert_eq!(invoked, Value::Long(2));

    let no_types: [&str; 0] = [];
    let invoked = invoker
        .invoke_method("getAlbumsCount", &no_types, vec![])
        .await
        .unwrap();
    assert_eq!(invoked, Value::Long(albums.get_albums_total().await.unwrap()));

    let invoked = invoker
        .invoke_method("getOSGiServiceIdentifier", &no_types, vec![])
        .await
        .unwrap();
    assert_eq!(invoked, Value::String(albums.osgi_service_identifier()));
}

#[tokio::test]
async fn test_create_album_is_not_persisted() {
    let catalog = catalog().await;
    let invoker = catalog.local_invoker();

    let invoked = invoker
        .invoke_method("createAlbum", &["long"], vec![Value::Long(42)])
        .await
        .unwrap();

    match invoked {
        Value::Album(album) => assert_eq!(album.album_id, 42),
        other => panic!("expected an album, got {:?}", other),
    }
    assert!(catalog.albums.fetch_album(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_and_update_album_with_fields() {
    let catalog = catalog().await;
    let coltrane = catalog.artist("John Coltrane").await;
    let invoker = catalog.local_invoker();

    let added = invoker
        .invoke_method(
            "addAlbum",
            &["long", "long", "string", "int", "bytes", "jukebox.service.ServiceContext"],
            vec![
                Value::Long(5),
                Value::Long(coltrane.artist_id),
                Value::from("Blue Train"),
                Value::Int(1957),
                Value::Bytes(vec![0xFF, 0xD8]),
                Value::ServiceContext(catalog.context),
            ],
        )
        .await
        .unwrap();
    let Value::Album(added) = added else {
        panic!("addAlbum should return an album");
    };
    assert_eq!(added.name, "Blue Train");
    assert_eq!(added.group_id, 20);

    // A null cover keeps the stored one
    let updated = invoker
        .invoke_method(
            "updateAlbum",
            &["long", "long", "long", "string", "int", "bytes", "jukebox.service.ServiceContext"],
            vec![
                Value::Long(5),
                Value::Long(added.album_id),
                Value::Long(coltrane.artist_id),
                Value::from("Blue Train (Remastered)"),
                Value::Int(2003),
                Value::Null,
                Value::ServiceContext(catalog.context),
            ],
        )
        .await
        .unwrap();
    assert!(matches!(updated, Value::Album(_)));

    let stored = catalog.albums.get_album(added.album_id).await.unwrap();
    assert_eq!(stored.name, "Blue Train (Remastered)");
    assert_eq!(stored.year, 2003);
    assert_eq!(stored.cover_image, Some(vec![0xFF, 0xD8]));
}

#[tokio::test]
async fn test_entity_level_add_update_delete() {
    let catalog = catalog().await;
    let monk = catalog.artist("Thelonious Monk").await;
    let invoker = catalog.local_invoker();

    let mut album = Album::new(0);
    album.company_id = 1;
    album.group_id = 20;
    album.artist_id = monk.artist_id;
    album.name = "Brilliant Corners".to_string();
    album.year = 1957;

    let Value::Album(mut stored) = invoker
        .invoke_method("addAlbum", &["jukebox.model.Album"], vec![Value::from(album)])
        .await
        .unwrap()
    else {
        panic!("addAlbum should return an album");
    };
    assert!(stored.album_id > 0);

    stored.year = 1956;
    invoker
        .invoke_method("updateAlbum", &["jukebox.model.Album"], vec![Value::from((*stored).clone())])
        .await
        .unwrap();
    assert_eq!(catalog.albums.get_album(stored.album_id).await.unwrap().year, 1956);

    invoker
        .invoke_method("deleteAlbum", &["jukebox.model.Album"], vec![Value::from(*stored.clone())])
        .await
        .unwrap();
    assert!(catalog.albums.fetch_album(stored.album_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_trash_and_restore_through_local_table() {
    let catalog = catalog().await;
    let miles = catalog.artist("Miles Davis").await;
    let album = catalog.album(&miles, "Bitches Brew", 1970).await;
    let invoker = catalog.local_invoker();
    let args = || vec![Value::Long(5), Value::Long(album.album_id)];

    let trashed = invoker
        .invoke_method("moveAlbumToTrash", &["long", "long"], args())
        .await
        .unwrap();
    let Value::Album(trashed) = trashed else {
        panic!("moveAlbumToTrash should return an album");
    };
    assert_eq!(trashed.status, EntryStatus::InTrash);
    assert_eq!(trashed.status_by_user_id, 5);
    assert!(catalog.albums.get_albums(20).await.unwrap().is_empty());

    // Trashing twice is rejected by the service and surfaces unchanged
    let err = invoker
        .invoke_method("moveAlbumToTrash", &["long", "long"], args())
        .await
        .unwrap_err();
    assert!(matches!(err, ClpError::Backing(Error::InvalidInput(_))));

    invoker
        .invoke_method("restoreAlbumFromTrash", &["long", "long"], args())
        .await
        .unwrap();
    assert_eq!(catalog.albums.get_albums(20).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_albums_returns_null() {
    let catalog = catalog().await;
    let miles = catalog.artist("Miles Davis").await;
    catalog.album(&miles, "Kind of Blue", 1959).await;
    catalog.album(&miles, "Milestones", 1958).await;
    let invoker = catalog.local_invoker();

    let result = invoker
        .invoke_method("deleteAlbums", &["long"], vec![Value::Long(20)])
        .await
        .unwrap();

    assert_eq!(result, Value::Null);
    assert_eq!(catalog.albums.get_albums_count(20).await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_album_propagates_not_found() {
    let catalog = catalog().await;
    let invoker = catalog.local_invoker();

    let err = invoker
        .invoke_method("getAlbum", &["long"], vec![Value::Long(404)])
        .await
        .unwrap_err();

    match err {
        ClpError::Backing(Error::NotFound(message)) => {
            assert_eq!(message, "No Album exists with the primary key 404");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_or_reordered_signatures_are_unsupported() {
    let catalog = catalog().await;
    let invoker = catalog.local_invoker();

    let err = invoker
        .invoke_method("getAlbum", &["string"], vec![Value::from("1")])
        .await
        .unwrap_err();
    assert!(matches!(err, ClpError::UnsupportedDispatch { .. }));

    let err = invoker
        .invoke_method(
            "fetchAlbumByUuidAndGroupId",
            &["long", "string"],
            vec![Value::Long(20), Value::from("uuid")],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClpError::UnsupportedDispatch { .. }));

    let err = invoker
        .invoke_method("getalbum", &["long"], vec![Value::Long(1)])
        .await
        .unwrap_err();
    assert!(matches!(err, ClpError::UnsupportedDispatch { .. }));
}

#[tokio::test]
async fn test_argument_count_and_type_are_checked() {
    let catalog = catalog().await;
    let invoker = catalog.local_invoker();

    let err = invoker
        .invoke_method("getAlbums", &["long", "int", "int"], vec![Value::Long(20)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClpError::Arity {
            expected: 3,
            actual: 1,
            ..
        }
    ));

    let err = invoker
        .invoke_method("getAlbum", &["long"], vec![Value::Int(1)])
        .await
        .unwrap_err();
    match err {
        ClpError::ArgumentType {
            index,
            expected,
            found,
            ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(expected, "long");
            assert_eq!(found, "int");
        }
        other => panic!("expected ArgumentType, got {:?}", other),
    }
}

#[tokio::test]
async fn test_remote_invoke_matches_direct_calls() {
    let catalog = catalog().await;
    let miles = catalog.artist("Miles Davis").await;
    let evans = catalog.artist("Bill Evans").await;
    catalog.album(&miles, "Kind of Blue", 1959).await;
    catalog.album(&miles, "Blue Haze", 1956).await;
    catalog.album(&evans, "Sunday at the Village Vanguard", 1961).await;

    let remote = catalog.remote();
    let invoker = AlbumServiceClpInvoker::new(remote.clone()).unwrap();

    let invoked = invoker
        .invoke_method(
            "getAlbums",
            &["long", "string"],
            vec![Value::Long(20), Value::from("blue")],
        )
        .await
        .unwrap();
    let direct = remote.search_albums(20, "blue").await.unwrap();
    assert_eq!(direct.len(), 2);
    assert_eq!(invoked, list(direct));

    let invoked = invoker
        .invoke_method(
            "getAlbumsCount",
            &["long", "string"],
            vec![Value::Long(20), Value::from("blue")],
        )
        .await
        .unwrap();
    assert_eq!(invoked, Value::Long(2));

    let invoked = invoker
        .invoke_method(
            "getAlbumsByArtistId",
            &["long", "long"],
            vec![Value::Long(20), Value::Long(miles.artist_id)],
        )
        .await
        .unwrap();
    assert_eq!(
        invoked,
        list(remote.get_albums_by_artist_id(20, miles.artist_id).await.unwrap())
    );

    let invoked = invoker
        .invoke_method(
            "getAlbumsCountByArtistId",
            &["long", "long"],
            vec![Value::Long(20), Value::Long(evans.artist_id)],
        )
        .await
        .unwrap();
    assert_eq!(invoked, Value::Long(1));

    // Other groups see nothing
    let invoked = invoker
        .invoke_method(
            "getAlbumsByArtistId",
            &["long", "long"],
            vec![Value::Long(21), Value::Long(miles.artist_id)],
        )
        .await
        .unwrap();
    assert_eq!(invoked, Value::List(vec![]));
}

#[tokio::test]
async fn test_remote_bean_identifier_round_trips() {
    let catalog = catalog().await;
    let invoker = AlbumServiceClpInvoker::new(catalog.remote()).unwrap();
    let no_types: [&str; 0] = [];

    let set = invoker
        .invoke_method(
            "setBeanIdentifier",
            &["string"],
            vec![Value::from("jukebox.service.AlbumService")],
        )
        .await
        .unwrap();
    assert_eq!(set, Value::Null);

    let got = invoker
        .invoke_method("getBeanIdentifier", &no_types, vec![])
        .await
        .unwrap();
    assert_eq!(got, Value::from("jukebox.service.AlbumService"));
}

#[tokio::test]
async fn test_remote_trash_is_attributed_to_principal() {
    let catalog = catalog().await;
    let miles = catalog.artist("Miles Davis").await;
    let album = catalog.album(&miles, "In a Silent Way", 1969).await;
    let invoker = AlbumServiceClpInvoker::new(catalog.remote()).unwrap();

    invoker
        .invoke_method("moveAlbumToTrash", &["long"], vec![Value::Long(album.album_id)])
        .await
        .unwrap();

    let stored = catalog.albums.get_album(album.album_id).await.unwrap();
    assert_eq!(stored.status, EntryStatus::InTrash);
    assert_eq!(stored.status_by_user_id, PRINCIPAL);

    invoker
        .invoke_method("restoreAlbumFromTrash", &["long"], vec![Value::Long(album.album_id)])
        .await
        .unwrap();
    assert!(!catalog.albums.get_album(album.album_id).await.unwrap().is_in_trash());
}

#[tokio::test]
async fn test_remote_add_update_delete() {
    let catalog = catalog().await;
    let miles = catalog.artist("Miles Davis").await;
    let invoker = AlbumServiceClpInvoker::new(catalog.remote()).unwrap();
    let context = Value::ServiceContext(catalog.context);

    let Value::Album(added) = invoker
        .invoke_method(
            "addAlbum",
            &["long", "string", "int", "bytes", "jukebox.service.ServiceContext"],
            vec![
                Value::Long(miles.artist_id),
                Value::from("Round About Midnight"),
                Value::Int(1957),
                Value::Null,
                context.clone(),
            ],
        )
        .await
        .unwrap()
    else {
        panic!("addAlbum should return an album");
    };

    invoker
        .invoke_method(
            "updateAlbum",
            &["long", "long", "string", "int", "bytes", "jukebox.service.ServiceContext"],
            vec![
                Value::Long(added.album_id),
                Value::Long(miles.artist_id),
                Value::from("'Round About Midnight"),
                Value::Int(1957),
                Value::Null,
                context.clone(),
            ],
        )
        .await
        .unwrap();
    assert_eq!(
        catalog.albums.get_album(added.album_id).await.unwrap().name,
        "'Round About Midnight"
    );

    invoker
        .invoke_method(
            "deleteAlbum",
            &["long", "jukebox.service.ServiceContext"],
            vec![Value::Long(added.album_id), context],
        )
        .await
        .unwrap();
    assert!(catalog.albums.fetch_album(added.album_id).await.unwrap().is_none());

    // Validation failures come back as the service raised them
    let err = invoker
        .invoke_method(
            "addAlbum",
            &["long", "string", "int", "bytes", "jukebox.service.ServiceContext"],
            vec![
                Value::Long(9999),
                Value::from("Ghost"),
                Value::Int(2000),
                Value::Null,
                Value::ServiceContext(catalog.context),
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClpError::Backing(Error::NotFound(_))));
}

#[tokio::test]
async fn test_artist_album_count_is_scoped_to_group_and_status() {
    let catalog = catalog().await;
    let miles = catalog.artist("Miles Davis").await;
    catalog.album(&miles, "Kind of Blue", 1959).await;
    let trashed = catalog.album(&miles, "Blue Haze", 1956).await;
    catalog
        .albums
        .add_album_with_fields(
            5,
            AlbumFields {
                artist_id: miles.artist_id,
                name: "Bitches Brew".to_string(),
                year: 1970,
                cover_image: None,
            },
            ServiceContext::new(1, 21, 5),
        )
        .await
        .unwrap();
    catalog.albums.move_album_to_trash(5, trashed.album_id).await.unwrap();

    let count = catalog
        .albums
        .get_group_albums_count_by_artist_id(20, miles.artist_id)
        .await
        .unwrap();
    let listed = catalog
        .albums
        .get_group_albums_by_artist_id(20, miles.artist_id)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(count, listed.len() as i64);

    let remote = catalog.remote();
    assert_eq!(remote.get_albums_count_by_artist_id(21, miles.artist_id).await.unwrap(), 1);
    assert_eq!(remote.get_albums_count_by_artist_id(22, miles.artist_id).await.unwrap(), 0);
}
