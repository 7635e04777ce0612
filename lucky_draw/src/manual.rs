/*!

This is the long-form manual for `lucky_draw` and `luckydraw`.

## Input formats

Names can be provided in several ways, and all of them add to the same roster:
* `text` free text, names separated by newlines or commas
* `csv` a file with one name per line. For rows with several columns, only
  the first column is used
* `xlsx` an Excel workbook. Names are read from the first column of the chosen
  worksheet

Empty names are ignored and surrounding spaces are removed. Nothing else is
changed: the same name can appear several times. `luckydraw roster` prints a
warning with the duplicated names and `--dedup` keeps only the first
occurrence of each name.

### Encodings

CSV files are read as UTF-8 first. Files saved by Excel on Traditional Chinese
Windows are usually in Big5; they are detected automatically. Any other
encoding is rejected and the file is not loaded.

## Lucky draw

Each draw shows a short animation of random names before drawing the winner.
The animation has no influence on the result: the winner is picked at the end,
uniformly among the participants still in the pool.

By default a person can only win once. Winners are identified by their
internal identifier, so two different people with the same name are both
eligible. With `--allow-repeats`, everybody stays in the pool after winning.

```bash
luckydraw -i staff.csv draw --count 3
```

## Groups

The roster is shuffled and cut into groups of the requested size. The last
group is smaller if the number of people is not a multiple of the group size.

```bash
luckydraw -i staff.csv group --size 4 --export groups.csv
```

The exported CSV file starts with a byte-order mark, so spreadsheet tools
display non-ASCII names correctly.

## Configuration file

All the options can also be stored in a JSON file:

```json
{
  "inputs": [
    { "provider": "csv", "filePath": "staff.csv" },
    { "provider": "text", "names": "Anna, Bob" },
    { "provider": "xlsx", "filePath": "staff.xlsx", "excelWorksheetName": "2024" }
  ],
  "removeDuplicates": true,
  "lottery": { "allowRepeats": false, "draws": 3, "animationFrames": 21, "frameIntervalMs": 80 },
  "grouping": { "groupSize": 4 }
}
```

File paths are relative to the configuration file. Command line flags take
precedence over the file.

## Interactive session

`luckydraw session` keeps a roster in memory and accepts commands on the
standard input. Type `help` for the list. `clear` must be typed twice within
3 seconds.

*/
