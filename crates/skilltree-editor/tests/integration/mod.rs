mod linking;
mod persistence;
mod pointer;
