use futures::future::{FutureExt, LocalBoxFuture};
use std::future::Future;
use texplorer_common::{SourceFileLocation, TypeInfo};

/// Fetches the type tree declared at a location, possibly from another
/// process. Used to expand `reference` nodes that carry a location.
pub trait TypeInfoRetriever {
    fn retrieve(
        &self,
        location: SourceFileLocation,
    ) -> LocalBoxFuture<'_, anyhow::Result<Option<TypeInfo>>>;
}

impl<F, Fut> TypeInfoRetriever for F
where
    F: Fn(SourceFileLocation) -> Fut,
    Fut: Future<Output = anyhow::Result<Option<TypeInfo>>> + 'static,
{
    fn retrieve(
        &self,
        location: SourceFileLocation,
    ) -> LocalBoxFuture<'_, anyhow::Result<Option<TypeInfo>>> {
        self(location).boxed_local()
    }
}
