pub mod property;
pub mod search;

pub use property::{
    City, Classified, ClassifiedSource, ClassifiedStatus, DpeRating, Energy, EnergyGesLabel,
    GesRating, Location, Media, Property, PropertyFacts, PropertyImage, PropertyMeta, Publisher,
    Transaction, TransactionPrice,
};
pub use search::{
    EnergyDpeLabel, PropertySearchBody, PropertySearchResponse, PropertyType, SearchMeta,
    SearchPage, SortBy, SortOrder, TransactionType,
};
