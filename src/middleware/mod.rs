/*
 * Responsibility
 * - Public interface of the middleware layer
 * - auth guards, cors, http-level layers, security headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
