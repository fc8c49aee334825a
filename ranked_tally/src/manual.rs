/*!

This is the long-form manual for `ranked_tally` and the `tally` program.

## Counting methods

All the methods work on the same ballot: a list of candidates, numbered from 1
in the order in which they are declared, and a list of participants, each one
ranking some candidates from the most preferred to the least preferred.

A candidate's *fraction* is its share of the votes held by the candidates that
are still running in the current round. A candidate wins with an absolute
majority when its fraction is strictly greater than one half.

Whenever candidates are tied, the candidate with the lower number is picked
(for elimination, for the runoff, or for the win). Two runs on the same input
always give the same result.

### `two_round`

Every participant ranks exactly two candidates: the first one is the vote of
the first round, the second one the vote of the runoff. Any other number of
preferences is rejected before counting.

If a candidate has the absolute majority in the first round, it wins. Otherwise
only the two best candidates of the first round remain, and the one with the
most votes in the second round wins.

### `instant_runoff`

Also known as the alternative vote. Each round, every participant votes for its
most preferred candidate still running. Participants with no such candidate
left do not vote. Without absolute majority, the candidate with the fewest
votes is eliminated and a new round starts.

### `coombs`

The majority check is the same as for `instant_runoff`. Without absolute
majority, the eliminated candidate is the one ranked *last* (among the
candidates still running) by the most participants. On the same ballot,
`coombs` and `instant_runoff` may eliminate different candidates and elect
different winners:

```text
2 participants: A > B > C
1 participant:  B > A > C
2 participants: C > B > A
```

`instant_runoff` eliminates B (fewest first preferences) and elects A.
`coombs` eliminates C (ranked last three times) and elects B.

## Input format

The `tally` program reads a text file (or the standard input). Empty lines and
lines starting with `//`, possibly indented, are ignored.

```text
// the candidates
Vanille
Chocolat
Fraise
// the participants: last name, first name, then the ranks
DUPONT
Marie
2
1
MARTIN
Paul
3
2
```

The candidates come first, one name per line. The first line without any
lowercase letter is the last name of the first participant. Each participant
is then described by its last name, its first name and the numbers of the
candidates it ranks, one per line, the most preferred first.

## Configuration

The program accepts a configuration file in JSON:

```text
{
  "outputSettings": { "contestName": "Glaces 2023", "contestDate": "2023-06-01" },
  "inputFile": "ballots.txt",
  "rules": { "algorithm": "coombs" }
}
```

The input file is relative to the directory of the configuration file. The
command line options `--input` and `--algorithm` override the configuration.
With `--out`, the summary of the rounds is written in JSON. With `--reference`,
this summary is compared with a reference file.

 */
