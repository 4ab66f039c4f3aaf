mod helpers;
mod shops;
