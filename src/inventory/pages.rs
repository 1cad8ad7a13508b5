//! Lazy page stream over a `ModelCatalog`
//!
//! Follows the continuation token until the catalog stops returning one. The
//! stream is finite and cannot be restarted; the first failed fetch is
//! yielded once and then the stream ends.

use super::catalog::{ModelCatalog, ModelPage};
use crate::error::AppResult;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

type ControlFlow = std::ops::ControlFlow<(), Option<String>>;

/// Stream of `ModelPage` results
pub struct ModelPages<'a> {
    stream: BoxStream<'a, AppResult<ModelPage>>,
}

impl<'a> ModelPages<'a> {
    pub fn new(catalog: &'a dyn ModelCatalog) -> Self {
        let stream = stream::unfold(ControlFlow::Continue(None), move |state| async move {
            let token = match state {
                ControlFlow::Continue(token) => token,
                ControlFlow::Break(()) => return None,
            };
            match catalog.list_page(token).await {
                Ok(page) => {
                    let next_state = match page.next_token.as_deref() {
                        Some(tok) if !tok.is_empty() => ControlFlow::Continue(Some(tok.to_string())),
                        _ => ControlFlow::Break(()),
                    };
                    Some((Ok(page), next_state))
                }
                Err(e) => Some((Err(e), ControlFlow::Break(()))),
            }
        });
        Self {
            stream: stream.boxed(),
        }
    }

    /// Await the next page, `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> Option<AppResult<ModelPage>> {
        self.stream.next().await
    }
}

impl Stream for ModelPages<'_> {
    type Item = AppResult<ModelPage>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.as_mut().poll_next(cx)
    }
}
