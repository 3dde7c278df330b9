//! Cart GraphQL documents.

pub(super) const CART_QUERY: &str = r"
query cart($id: ID!) {
  cart(id: $id) { id totalQuantity }
}
";

pub(super) const CART_CREATE: &str = r"
mutation cartCreate($input: CartInput!) {
  cartCreate(input: $input) {
    cart {
      id
      checkoutUrl
      lines(first: 100) { edges { node { id merchandise { ... on ProductVariant { id } } } } }
    }
    userErrors { field message }
  }
}
";

pub(super) const CART_LINES_ADD: &str = r"
mutation cartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      id
      lines(first: 100) { edges { node { id merchandise { ... on ProductVariant { id } } } } }
    }
    userErrors { field message }
  }
}
";

pub(super) const CART_LINES_UPDATE: &str = r"
mutation cartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart { id }
    userErrors { field message }
  }
}
";

pub(super) const CART_LINES_REMOVE: &str = r"
mutation cartLinesRemove($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart { id }
    userErrors { field message }
  }
}
";
