use std::marker::PhantomData;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Loads any deserializable asset from a RON data file.
#[derive(TypePath)]
pub struct DataLoader<T: TypePath> {
    extensions: Vec<&'static str>,
    _phantom: PhantomData<T>,
}

impl<T: TypePath> DataLoader<T> {
    pub fn new(extensions: &[&'static str]) -> Self {
        Self {
            extensions: extensions.to_vec(),
            _phantom: PhantomData,
        }
    }
}

/// Parses one data file body (pure function for testing).
pub fn parse_data<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, DataLoaderError> {
    Ok(ron::de::from_bytes::<T>(bytes)?)
}

impl<T> AssetLoader for DataLoader<T>
where
    T: Asset + TypePath + for<'de> Deserialize<'de> + Send + Sync + 'static,
{
    type Asset = T;
    type Settings = ();
    type Error = DataLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        parse_data::<T>(&bytes)
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::assets::ItemCatalogAsset;

    #[test]
    fn parse_data_reads_item_catalog() {
        let catalog: ItemCatalogAsset = parse_data(
            br#"(
                items: [
                    (id: "coin", name: "Coin", description: "", class: Coin(value: 1)),
                    (id: "potion", name: "Potion", description: ""),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.items.len(), 2);
    }

    #[test]
    fn parse_data_reports_ron_errors() {
        let result = parse_data::<ItemCatalogAsset>(b"(items: [(id: 3)])");

        assert!(matches!(result, Err(DataLoaderError::Ron(_))));
    }
}
