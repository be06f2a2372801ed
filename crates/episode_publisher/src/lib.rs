//! # Episode Publisher
//!
//! This crate takes a finished episode (metadata plus a local audio file)
//! and pushes it out to the world: the audio goes to a blob container, a
//! read-only signed URL is minted and shortened, and the episode record is
//! registered with the podcast-hosting API.
//!
//! Each external service sits behind a small trait (`BlobStore`,
//! `LinkShortener`, `PodcastHost`) so the sequencing logic in
//! `EpisodePublisher` can be exercised without network access.

mod blob;
mod domain;
mod host;
mod publisher;
mod shortener;

pub use blob::azure::{AzureBlobStore, AzureStoreError};
pub use blob::{blob_name_for, sanitize_blob_name, BlobStore};
pub use domain::{EpisodeMetadata, PublishReceipt, PublishRequest, PublishedEpisode};
pub use host::{HostError, HostedEpisodeClient, PodcastHost};
pub use publisher::{AudioPublisher, EpisodePublisher};
pub use shortener::{BitlyShortener, LinkShortener};
