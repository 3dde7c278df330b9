//! Catalog GraphQL documents.

macro_rules! product_fields {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  descriptionHtml
  tags
  productType
  images(first: 10) { edges { node { url altText width height } } }
  variants(first: 20) {
    edges {
      node {
        id
        title
        availableForSale
        price { amount currencyCode }
        compareAtPrice { amount currencyCode }
        selectedOptions { name value }
        image { url altText width height }
      }
    }
  }
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  compareAtPriceRange {
    minVariantPrice { amount currencyCode }
  }
}
"
    };
}

pub(super) const PRODUCTS_QUERY: &str = concat!(
    product_fields!(),
    r"
query GetProducts($first: Int!, $query: String) {
  products(first: $first, query: $query) {
    edges { node { ...ProductFields } }
  }
}
"
);

pub(super) const PRODUCT_BY_HANDLE_QUERY: &str = concat!(
    product_fields!(),
    r"
query GetProduct($handle: String!) {
  productByHandle(handle: $handle) { ...ProductFields }
}
"
);

pub(super) const COLLECTIONS_QUERY: &str = concat!(
    product_fields!(),
    r"
query GetCollections($first: Int!) {
  collections(first: $first) {
    edges {
      node {
        id
        handle
        title
        description
        image { url altText width height }
        products(first: 12) { edges { node { ...ProductFields } } }
      }
    }
  }
}
"
);

pub(super) const COLLECTION_BY_HANDLE_QUERY: &str = concat!(
    product_fields!(),
    r"
query GetCollection($handle: String!) {
  collectionByHandle(handle: $handle) {
    id
    handle
    title
    description
    image { url altText width height }
    products(first: 50) { edges { node { ...ProductFields } } }
  }
}
"
);
