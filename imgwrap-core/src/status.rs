//! Maps a resource's load status onto the presentation tag to display.

use imgwrap_contracts::CachedResource;
use imgwrap_model::PresentationConfig;

/// Active presentation tag for `resource` under `config`.
///
/// No resource means nothing to show, so the tag is `None`.
pub fn resolve<'a, R>(
    resource: Option<&R>,
    config: &'a PresentationConfig,
) -> Option<&'a str>
where
    R: CachedResource + ?Sized,
{
    resource.map(|resource| config.tag_for(resource.status()))
}
