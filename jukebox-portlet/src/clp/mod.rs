//! Cross-protocol layer
//!
//! Lets a caller holding only a method name, a list of type tags and a list
//! of [`Value`]s reach a statically-typed catalog service. Each invoker owns
//! a [`DispatchTable`] whose thunks are generated at construction by
//! [`clp_method!`](crate::clp_method).

pub mod dispatch;
pub mod error;
pub mod invoker;
pub mod value;

pub use dispatch::{DispatchEntry, DispatchTable, DispatchTableBuilder, InvokeFuture};
pub use error::{ClpError, ClpResult};
pub use invoker::{
    AlbumLocalServiceClpInvoker, AlbumServiceClpInvoker, ArtistLocalServiceClpInvoker,
    SongLocalServiceClpInvoker,
};
pub use value::{type_tag, ArgReader, FromValue, Value};

/// Register a typed service call on a [`DispatchTableBuilder`]
///
/// The signature is derived from the declared argument types through
/// [`FromValue::TYPE_TAG`]; the body receives the cloned service handle and
/// the coerced arguments and must evaluate to `jukebox_common::Result<T>`
/// with `T: Into<Value>`.
///
/// ```ignore
/// let builder = clp_method!(builder, service, "getAlbum", |s, album_id: i64| {
///     s.get_album(album_id).await
/// })?;
/// ```
#[macro_export]
macro_rules! clp_method {
    ($builder:expr, $service:expr, $name:literal, |$svc:ident $(, $arg:ident : $ty:ty)*| $call:expr) => {{
        let service = ::std::sync::Arc::clone(&$service);
        $builder.register(
            $name,
            &[$(<$ty as $crate::clp::FromValue>::TYPE_TAG),*],
            move |args: ::std::vec::Vec<$crate::clp::Value>| {
                let $svc = ::std::sync::Arc::clone(&service);
                async move {
                    #[allow(unused_mut, unused_variables)]
                    let mut reader = $crate::clp::ArgReader::new($name, args);
                    $(let $arg: $ty = reader.next()?;)*
                    let result: ::jukebox_common::Result<_> = $call;
                    Ok::<_, $crate::clp::ClpError>($crate::clp::Value::from(result?))
                }
            },
        )
    }};
}
