//! Typed endpoint handles.
//!
//! The typed accessors of [`ApiClient`](super::ApiClient) return an
//! [`EndpointHandle`] tagged with one of the marker types of this module. The
//! handle offers the same request configuration and verbs as [`ApiCall`], plus the
//! sub-resources that only make sense for its endpoint:
//!
//! ```rust
//! # use copernica_core::ApiClient;
//! # fn example() -> Result<(), copernica_core::ApiClientError> {
//! let client = ApiClient::new("my-token", false)?;
//!
//! let call = client.database(17).profiles().with_limit(100);
//! assert_eq!(call.resource_path(), "database/17");
//! assert_eq!(call.extra(), Some("profiles"));
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;

use serde::Serialize;

use super::{ApiCall, ApiClientError, CallQuery, CallResult, EndpointKind, ParamValue};

/// A Copernica endpoint known at compile time.
pub trait Endpoint {
    /// The endpoint resolved by the typed accessor.
    const KIND: EndpointKind;
}

macro_rules! endpoint_markers {
    ($($(#[$meta:meta])* $marker:ident => $kind:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $marker;

            impl Endpoint for $marker {
                const KIND: EndpointKind = EndpointKind::$kind;
            }
        )+
    };
}

endpoint_markers! {
    /// Marker for `collection/{id}`.
    Collection => Collection,
    /// Marker for `database/{id}` and `databases`.
    Database => Database,
    /// Marker for `datarequest/{id}`.
    Datarequest => Datarequest,
    /// Marker for `email/{id}`.
    Email => Email,
    /// Marker for `emailingdocument/{id}`.
    Emailingdocument => Emailingdocument,
    /// Marker for `identity`.
    Identity => Identity,
    /// Marker for `logfiles/{name}`.
    Logfiles => Logfiles,
    /// Marker for `message/{id}`.
    Message => Message,
    /// Marker for `minirule/{id}`.
    Minirule => Minirule,
    /// Marker for `miniview/{id}`.
    Miniview => Miniview,
    /// Marker for `profile/{id}`.
    Profile => Profile,
    /// Marker for `rule/{id}`.
    Rule => Rule,
    /// Marker for `subprofile/{id}`.
    Subprofile => Subprofile,
    /// Marker for `tags/{tag}`.
    Tags => Tags,
    /// Marker for `template/{id}`.
    Template => Template,
    /// Marker for `view/{id}`.
    View => View,
}

/// An [`ApiCall`] resolved through a typed accessor.
///
/// Read accessors of the underlying call are reachable through `Deref`.
#[derive(derive_more::Debug, Clone, derive_more::Deref)]
pub struct EndpointHandle<E> {
    #[deref]
    call: ApiCall,
    #[debug(skip)]
    endpoint: PhantomData<fn() -> E>,
}

impl<E> EndpointHandle<E> {
    pub(in crate::client) fn new(call: ApiCall) -> Self {
        Self {
            call,
            endpoint: PhantomData,
        }
    }

    /// Returns the untyped call.
    pub fn into_call(self) -> ApiCall {
        self.call
    }

    fn map(self, update: impl FnOnce(ApiCall) -> ApiCall) -> Self {
        Self::new(update(self.call))
    }

    fn sub_resource(self, extra: impl Into<String>) -> Self {
        self.map(|call| call.with_extra(extra))
    }

    /// See [`ApiCall::with_start`].
    pub fn with_start(self, start: u64) -> Self {
        self.map(|call| call.with_start(start))
    }

    /// See [`ApiCall::with_limit`].
    pub fn with_limit(self, limit: u64) -> Self {
        self.map(|call| call.with_limit(limit))
    }

    /// See [`ApiCall::with_total`].
    pub fn with_total(self, total: bool) -> Self {
        self.map(|call| call.with_total(total))
    }

    /// See [`ApiCall::with_param`].
    pub fn with_param(self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.map(|call| call.with_param(name, value))
    }

    /// See [`ApiCall::with_query`].
    pub fn with_query(self, query: CallQuery) -> Self {
        self.map(|call| call.with_query(query))
    }

    /// See [`ApiCall::with_field`].
    pub fn with_field(self, condition: impl Into<String>) -> Self {
        self.map(|call| call.with_field(condition))
    }

    /// See [`ApiCall::with_extra`].
    pub fn with_extra(self, extra: impl Into<String>) -> Self {
        self.sub_resource(extra)
    }

    /// See [`ApiCall::get`].
    ///
    /// # Errors
    ///
    /// See [`ApiCall::get`].
    pub async fn get(self) -> Result<CallResult, ApiClientError> {
        self.call.get().await
    }

    /// See [`ApiCall::post`].
    ///
    /// # Errors
    ///
    /// See [`ApiCall::post`].
    pub async fn post<B>(self, body: &B) -> Result<CallResult, ApiClientError>
    where
        B: Serialize + ?Sized,
    {
        self.call.post(body).await
    }

    /// See [`ApiCall::put`].
    ///
    /// # Errors
    ///
    /// See [`ApiCall::put`].
    pub async fn put<B>(self, body: &B) -> Result<CallResult, ApiClientError>
    where
        B: Serialize + ?Sized,
    {
        self.call.put(body).await
    }

    /// See [`ApiCall::delete`].
    ///
    /// # Errors
    ///
    /// See [`ApiCall::delete`].
    pub async fn delete(self) -> Result<CallResult, ApiClientError> {
        self.call.delete().await
    }
}

impl<E> From<EndpointHandle<E>> for ApiCall {
    fn from(handle: EndpointHandle<E>) -> Self {
        handle.into_call()
    }
}

impl EndpointHandle<Database> {
    /// `database/{id}/profiles`
    pub fn profiles(self) -> Self {
        self.sub_resource("profiles")
    }

    /// `database/{id}/collections`
    pub fn collections(self) -> Self {
        self.sub_resource("collections")
    }

    /// `database/{id}/fields`
    pub fn fields(self) -> Self {
        self.sub_resource("fields")
    }

    /// `database/{id}/interests`
    pub fn interests(self) -> Self {
        self.sub_resource("interests")
    }

    /// `database/{id}/views`
    pub fn views(self) -> Self {
        self.sub_resource("views")
    }

    /// `database/{id}/unsubscribe`
    pub fn unsubscribe(self) -> Self {
        self.sub_resource("unsubscribe")
    }

    /// `database/{id}/intentions`
    pub fn intentions(self) -> Self {
        self.sub_resource("intentions")
    }
}

impl EndpointHandle<Collection> {
    /// `collection/{id}/subprofiles`
    pub fn subprofiles(self) -> Self {
        self.sub_resource("subprofiles")
    }

    /// `collection/{id}/fields`
    pub fn fields(self) -> Self {
        self.sub_resource("fields")
    }

    /// `collection/{id}/miniviews`
    pub fn miniviews(self) -> Self {
        self.sub_resource("miniviews")
    }
}

impl EndpointHandle<Profile> {
    /// `profile/{id}/fields`
    pub fn fields(self) -> Self {
        self.sub_resource("fields")
    }

    /// `profile/{id}/interests`
    pub fn interests(self) -> Self {
        self.sub_resource("interests")
    }

    /// `profile/{id}/subprofiles/{collection_id}`
    pub fn subprofiles(self, collection_id: u64) -> Self {
        self.sub_resource(format!("subprofiles/{collection_id}"))
    }

    /// `profile/{id}/files`
    pub fn files(self) -> Self {
        self.sub_resource("files")
    }
}

impl EndpointHandle<Subprofile> {
    /// `subprofile/{id}/fields`
    pub fn fields(self) -> Self {
        self.sub_resource("fields")
    }
}

impl EndpointHandle<View> {
    /// `view/{id}/profiles`
    pub fn profiles(self) -> Self {
        self.sub_resource("profiles")
    }

    /// `view/{id}/rules`
    pub fn rules(self) -> Self {
        self.sub_resource("rules")
    }

    /// `view/{id}/views`
    pub fn views(self) -> Self {
        self.sub_resource("views")
    }
}

impl EndpointHandle<Miniview> {
    /// `miniview/{id}/subprofiles`
    pub fn subprofiles(self) -> Self {
        self.sub_resource("subprofiles")
    }

    /// `miniview/{id}/minirules`
    pub fn minirules(self) -> Self {
        self.sub_resource("minirules")
    }
}

impl EndpointHandle<Rule> {
    /// `rule/{id}/conditions`
    pub fn conditions(self) -> Self {
        self.sub_resource("conditions")
    }
}

impl EndpointHandle<Minirule> {
    /// `minirule/{id}/conditions`
    pub fn conditions(self) -> Self {
        self.sub_resource("conditions")
    }
}
