mod directory;
mod session;
